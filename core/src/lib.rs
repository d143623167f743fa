//! # OrgVerify Core
//!
//! Core business logic and domain layer for the OrgVerify backend.
//! This crate contains the organization and verification record entities,
//! the one-time code workflow, repository interfaces with in-memory
//! implementations, and the error types shared by the outer layers.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
