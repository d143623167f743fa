//! One-time code service for organization contact-email verification
//!
//! This module provides the complete code workflow:
//! - Unique numeric code generation from an injected random source
//! - Issuance with a single outstanding record per organization
//! - Verification against the expiry window
//! - Resend with a lifetime issuance cap
//! - A read-only view of the verification state machine

mod clock;
mod code_generator;
mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{Clock, SystemClock};
pub use code_generator::{CodeGenerator, OsRandomSource, RandomSource, SeededRandomSource};
pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::EmailServiceTrait;
pub use types::{SendCodeResult, VerificationStatus, VerificationSummary};
