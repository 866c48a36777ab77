//! Health check endpoint.

use actix_web::{HttpResponse, web};
use vigia_shared::dto::{HealthResponse, StoreHealth};

use crate::state::AppState;

/// Health check endpoint - returns server and store status.
///
/// GET /api/health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let connected = match state.posts.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Health check: post store unreachable");
            false
        }
    };

    let response = HealthResponse {
        status: if connected { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        store: StoreHealth {
            backend: state.store_backend.to_string(),
            connected,
        },
        moderation_configured: state.credentials.is_configured(),
    };

    if connected {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}
