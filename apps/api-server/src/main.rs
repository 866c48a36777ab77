//! # Vigia API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use middleware::cors::cors_policy;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();
    tracing::debug!(?config, "Configuration loaded");
    config.validate()?;

    tracing::info!(
        "Starting Vigia API Server on {}:{} ({:?})",
        config.host,
        config.port,
        config.environment
    );

    let state = AppState::new(&config).await?;

    let trusted_origins = config.moderation.trusted_origins.clone();
    let production = config.environment.is_production();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_policy(&trusted_origins, production))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}
