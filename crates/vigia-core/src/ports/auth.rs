//! Moderator authorization ports.

/// Validates the moderator credential presented with a request.
///
/// The credential is a single shared secret, not a per-user identity:
/// every holder of the secret is "the moderator". Implementations keep no
/// session state, so each request is checked independently.
pub trait CredentialValidator: Send + Sync {
    /// Whether a secret is configured at all. Never reveals the secret.
    fn is_configured(&self) -> bool;

    /// Check a bearer token against the configured secret.
    ///
    /// Must fail with `AuthError::NotConfigured` when no secret is set.
    fn validate(&self, token: &str) -> Result<(), AuthError>;
}

/// Authorization failures for moderator-only operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("credential required")]
    MissingCredential,

    #[error("malformed credential")]
    MalformedCredential,

    #[error("invalid credential")]
    InvalidCredential,

    #[error("untrusted origin")]
    UntrustedOrigin,

    #[error("moderation credential is not configured")]
    NotConfigured,
}
