//! Moderator authorization extractor.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use std::future::{Ready, ready};

use vigia_core::ports::AuthError;

use super::error::AppError;
use crate::state::AppState;

/// Proof that the request passed the origin policy and presented the
/// moderator secret.
///
/// Use this in handlers to gate moderator-only routes:
/// ```ignore
/// async fn moderation_stats(_moderator: Moderator) -> impl Responder { ... }
/// ```
#[derive(Debug, Clone)]
pub struct Moderator {
    pub remote_addr: String,
}

impl FromRequest for Moderator {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authorize(req))
    }
}

fn authorize(req: &HttpRequest) -> Result<Moderator, AppError> {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
        tracing::error!("AppState not found in app data");
        return Err(AppError::Internal("application state missing".to_string()));
    };

    // Audit the socket peer; forwarding headers are client-supplied.
    let remote_addr = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let forwarded_for = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);

    if let Err(e) = check(req, state) {
        tracing::warn!(
            remote_addr = %remote_addr,
            forwarded_for = ?forwarded_for,
            path = %req.path(),
            reason = %e,
            "Moderator access denied"
        );
        return Err(e.into());
    }

    tracing::info!(
        remote_addr = %remote_addr,
        forwarded_for = ?forwarded_for,
        path = %req.path(),
        "Moderator access granted"
    );
    Ok(Moderator { remote_addr })
}

fn check(req: &HttpRequest, state: &AppState) -> Result<(), AuthError> {
    let referer = req
        .headers()
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok());
    state.origin_policy.check(referer, request_host(req))?;

    if !state.credentials.is_configured() {
        return Err(AuthError::NotConfigured);
    }

    let token = parse_bearer(req.headers().get(header::AUTHORIZATION))?;
    state.credentials.validate(token)
}

/// The `Host` the client addressed, ignoring `Forwarded`/`X-Forwarded-Host`.
fn request_host(req: &HttpRequest) -> &str {
    req.headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_else(|| req.app_config().host())
}

/// Extract the trimmed token from an `Authorization: Bearer <token>` header.
fn parse_bearer(value: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let value = value.ok_or(AuthError::MissingCredential)?;
    let value = value
        .to_str()
        .map_err(|_| AuthError::MalformedCredential)?;

    match value.strip_prefix("Bearer ").map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedCredential),
    }
}
