pub mod organization;
pub mod verification_record;

pub use organization::{InMemoryOrganizationRepository, OrganizationRepository};
pub use verification_record::{InMemoryVerificationRecordRepository, VerificationRecordRepository};
