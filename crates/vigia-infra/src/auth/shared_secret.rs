//! Shared-secret bearer credential.

use std::fmt;

use subtle::ConstantTimeEq;

use vigia_core::ports::{AuthError, CredentialValidator};

/// Validates bearer tokens against a single process-wide secret.
///
/// Comparison is exact byte equality, done in constant time so response
/// timing does not leak how much of a guess matched.
pub struct SharedSecretValidator {
    secret: Option<String>,
}

impl SharedSecretValidator {
    /// A blank secret is treated as not configured.
    pub fn new(secret: Option<String>) -> Self {
        let secret = secret.filter(|s| !s.trim().is_empty());
        if secret.is_none() {
            tracing::error!(
                "Moderation secret is not configured - all moderator requests will be refused"
            );
        }
        Self { secret }
    }
}

impl fmt::Debug for SharedSecretValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSecretValidator")
            .field("configured", &self.secret.is_some())
            .finish()
    }
}

impl CredentialValidator for SharedSecretValidator {
    fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    fn validate(&self, token: &str) -> Result<(), AuthError> {
        let secret = self.secret.as_ref().ok_or(AuthError::NotConfigured)?;

        if bool::from(token.as_bytes().ct_eq(secret.as_bytes())) {
            Ok(())
        } else {
            Err(AuthError::InvalidCredential)
        }
    }
}
