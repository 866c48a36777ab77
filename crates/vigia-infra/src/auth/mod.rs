//! Moderator credential implementations.

mod shared_secret;

pub use shared_secret::SharedSecretValidator;
