//! Business services containing domain logic and use cases.

pub mod cleanup;
pub mod organization;
pub mod otp;

// Re-export commonly used types
pub use cleanup::{CleanupResult, VerificationCleanupConfig, VerificationCleanupService};
pub use organization::{OrganizationService, RegistrationResult};
pub use otp::{
    Clock, CodeGenerator, EmailServiceTrait, OsRandomSource, OtpService, OtpServiceConfig,
    RandomSource, SeededRandomSource, SendCodeResult, SystemClock, VerificationStatus,
    VerificationSummary,
};
