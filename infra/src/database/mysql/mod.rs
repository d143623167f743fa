//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

pub mod organization_repository_impl;
pub mod verification_record_repository_impl;

// Re-export the MySQL implementations
pub use organization_repository_impl::MySqlOrganizationRepository;
pub use verification_record_repository_impl::MySqlVerificationRecordRepository;

use ov_core::errors::DomainError;

/// Wrap a SQLx failure as an internal domain error
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Whether the error is a MySQL duplicate key violation
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Whether the error is a MySQL foreign key violation
pub(crate) fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
