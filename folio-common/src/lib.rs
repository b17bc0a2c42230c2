//! # Folio Common Library
//!
//! Shared code for the portfolio backend:
//! - Database initialization and per-entity storage operations
//! - Entity models and insert schemas
//! - Bootstrap configuration loading
//! - Password hashing for the admin account

pub mod config;
pub mod credentials;
pub mod db;
pub mod error;

pub use error::{Error, Result};
