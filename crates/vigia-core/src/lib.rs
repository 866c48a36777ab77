//! # Vigia Core
//!
//! The domain layer of the Vigia report board: the post lifecycle, the
//! moderation workflow and the public query/statistics views.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
