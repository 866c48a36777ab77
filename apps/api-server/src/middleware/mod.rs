//! Middleware modules.

pub mod auth;
pub mod cors;
pub mod error;
pub mod origin;
