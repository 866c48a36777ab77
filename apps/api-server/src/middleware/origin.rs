//! Origin policy for moderator routes.
//!
//! The `Referer` header is trivially forged by non-browser clients, so this
//! check is defense-in-depth only. The bearer credential remains the actual
//! authorization boundary.
//!
//! The host compared against is the request's own `Host` header.
//! `Forwarded` and `X-Forwarded-Host` are not consulted, so a reverse proxy
//! in front of the server must preserve `Host` or list its public origin in
//! `FRONTEND_URL`.

use actix_web::http::Uri;
use vigia_core::ports::AuthError;

/// Decides whether a moderator request arrived from a trusted page.
/// The default policy is not enforced and lets every request through.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    enforce: bool,
    /// Lowercased `host[:port]` authorities of the trusted origins.
    trusted: Vec<String>,
}

impl OriginPolicy {
    /// Build the policy. Origins that do not parse to an authority are
    /// skipped with a warning.
    pub fn new(enforce: bool, trusted_origins: &[String]) -> Self {
        let trusted = trusted_origins
            .iter()
            .filter_map(|origin| {
                let authority = authority_of(origin);
                if authority.is_none() {
                    tracing::warn!(origin = %origin, "Ignoring unparseable trusted origin");
                }
                authority
            })
            .collect();

        Self { enforce, trusted }
    }

    pub fn is_enforced(&self) -> bool {
        self.enforce
    }

    /// Check the request's referer against its own host and the trusted
    /// origins.
    pub fn check(&self, referer: Option<&str>, host: &str) -> Result<(), AuthError> {
        if !self.enforce {
            return Ok(());
        }

        let authority = referer
            .and_then(authority_of)
            .ok_or(AuthError::UntrustedOrigin)?;

        if authority.eq_ignore_ascii_case(host) || self.trusted.contains(&authority) {
            Ok(())
        } else {
            Err(AuthError::UntrustedOrigin)
        }
    }
}

fn authority_of(url: &str) -> Option<String> {
    let uri: Uri = url.trim().parse().ok()?;
    uri.authority().map(|a| a.as_str().to_ascii_lowercase())
}
