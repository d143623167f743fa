//! Background removal of stale verification records

mod service;


pub use service::{CleanupResult, VerificationCleanupConfig, VerificationCleanupService};
