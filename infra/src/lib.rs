//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the OrgVerify
//! application, following Clean Architecture principles. It provides concrete
//! implementations of the core repository and dispatcher traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL connection pool, migrations and repositories using SQLx
//! - **Email**: Verification code delivery through an HTTP provider or a mock

// Re-export core types for convenience
pub use ov_core::errors::*;

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Email module - Verification code delivery
pub mod email;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),
}
