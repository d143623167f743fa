//! Verification record store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::organization::OrganizationId;
use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::DomainError;

/// Persistence of outstanding one-time codes and the issuance history
///
/// The store keeps at most one outstanding record per organization and
/// never allows two outstanding records to share a code. Every successful
/// `create` is also appended to an issuance history that deletion does not
/// shrink, which is what `count_issuances` reports.
#[async_trait]
pub trait VerificationRecordRepository: Send + Sync {
    /// Persist a record, replacing the organization's previous outstanding one
    ///
    /// # Returns
    /// * `Ok(VerificationRecord)` - The stored record
    /// * `Err(DomainError::Otp(OtpError::AlreadyExists))` - The code is held by another organization
    /// * `Err(DomainError)` - Storage failure
    async fn create(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError>;

    /// Find the outstanding record matching both organization and code
    async fn find(
        &self,
        organization_id: OrganizationId,
        code: &str,
    ) -> Result<Option<VerificationRecord>, DomainError>;

    /// Find the outstanding record of an organization, whatever its code
    async fn find_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<VerificationRecord>, DomainError>;

    /// Number of codes ever issued to the organization
    async fn count_issuances(&self, organization_id: OrganizationId) -> Result<u32, DomainError>;

    /// Delete the organization's outstanding record
    ///
    /// # Returns
    /// * `Ok(true)` - A record was deleted by this call
    /// * `Ok(false)` - There was nothing to delete
    async fn delete_by_organization(&self, organization_id: OrganizationId) -> Result<bool, DomainError>;

    /// Whether any outstanding record currently holds `code`
    async fn code_exists(&self, code: &str) -> Result<bool, DomainError>;

    /// Delete outstanding records issued strictly before `cutoff`
    ///
    /// The issuance history is left untouched.
    async fn delete_issued_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError>;
}
