//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup into an explicit `AppConfig` value
//! and injected from there; nothing reads the environment afterwards.

use std::env;
use std::fmt;

use vigia_infra::DatabaseConfig;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

/// Settings for the moderator gate and the origin policy.
#[derive(Clone, Default)]
pub struct ModerationConfig {
    /// Shared moderator secret (`MODERATION_API_KEY`).
    pub api_key: Option<String>,
    /// Extra origins trusted by the origin policy (`FRONTEND_URL`).
    pub trusted_origins: Vec<String>,
}

impl fmt::Debug for ModerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModerationConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("trusted_origins", &self.trusted_origins)
            .finish()
    }
}

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("MODERATION_API_KEY must be set when running in production")]
    MissingModerationKey,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub database: Option<DatabaseConfig>,
    pub moderation: ModerationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(10),
            run_migrations: env::var("RUN_MIGRATIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        });

        let moderation = ModerationConfig {
            api_key: env::var("MODERATION_API_KEY")
                .ok()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            trusted_origins: split_origins(env::var("FRONTEND_URL").ok().as_deref()),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(3001),
            environment: Environment::parse(env::var("RUST_ENV").ok().as_deref()),
            database,
            moderation,
        }
    }

    /// Check settings that must hold before the server accepts traffic.
    ///
    /// Production refuses to start without a moderation secret. Development
    /// starts anyway and every moderator request fails closed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.moderation.api_key.is_none() {
            if self.environment.is_production() {
                return Err(ConfigError::MissingModerationKey);
            }
            tracing::error!(
                "MODERATION_API_KEY is not set - moderator endpoints will answer 500 until it is configured"
            );
        }

        if self.moderation.trusted_origins.is_empty() {
            tracing::warn!("FRONTEND_URL is not set - only same-host referers pass the origin policy");
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Split a comma-separated origin list, dropping blanks.
fn split_origins(raw: Option<&str>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    })
    .unwrap_or_default()
}
