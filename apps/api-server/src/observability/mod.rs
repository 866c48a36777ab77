//! Observability - alert forwarding for ERROR-level events.

mod alert;

pub use alert::AlertLayer;
