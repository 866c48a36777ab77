//! # Vigia Infrastructure
//!
//! Concrete implementations of the ports defined in `vigia-core`.
//! This crate contains the post stores and the moderator credential check.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `postgres` - PostgreSQL post store via SeaORM

pub mod auth;
pub mod database;

pub use auth::SharedSecretValidator;
pub use database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository};
