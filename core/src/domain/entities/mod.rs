//! Domain entities representing core business objects.

pub mod organization;
pub mod verification_record;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use organization::{NewOrganization, Organization, OrganizationId, OrganizationVerificationState};
pub use verification_record::{
    VerificationRecord, DEFAULT_CODE_LENGTH, DEFAULT_EXPIRY_SECONDS, DEFAULT_MAX_ISSUANCES,
};
