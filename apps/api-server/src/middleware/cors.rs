//! Cross-origin policy for the browser frontend.

use actix_cors::Cors;
use actix_web::http::{Method, Uri, header};

/// Build the CORS middleware.
///
/// Configured `FRONTEND_URL` origins are the only ones allowed. Without any,
/// development allows every origin and production allows none.
pub fn cors_policy(trusted_origins: &[String], production: bool) -> Cors {
    let origins: Vec<String> = trusted_origins
        .iter()
        .filter_map(|origin| {
            let normalized = normalize_origin(origin);
            if normalized.is_none() {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
            }
            normalized
        })
        .collect();

    let cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::PUT])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600);

    if origins.is_empty() && !production {
        return cors.allow_any_origin();
    }

    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

/// `scheme://authority` as browsers send it in `Origin`.
fn normalize_origin(origin: &str) -> Option<String> {
    let uri: Uri = origin.trim().parse().ok()?;
    let scheme = uri.scheme_str()?;
    let authority = uri.authority()?;
    Some(format!("{scheme}://{}", authority.as_str().to_ascii_lowercase()))
}
