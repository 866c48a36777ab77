//! Application services - the workflows exposed over HTTP.
//!
//! Each service holds a handle to the post store and nothing else, so they
//! are cheap to clone into per-worker application state.

mod moderation;
mod query;
mod submission;

pub use moderation::ModerationService;
pub use query::QueryService;
pub use submission::SubmissionService;
