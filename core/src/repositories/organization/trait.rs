//! Organization directory trait.

use async_trait::async_trait;

use crate::domain::entities::organization::{NewOrganization, Organization, OrganizationId};
use crate::errors::DomainError;

/// Organization directory as used by the verification workflow
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    /// Whether an organization with this id exists
    async fn exists(&self, id: OrganizationId) -> Result<bool, DomainError>;

    /// Contact email of the organization
    ///
    /// # Returns
    /// * `Ok(String)` - The stored address
    /// * `Err(DomainError::NotFound)` - No such organization
    async fn get_contact_email(&self, id: OrganizationId) -> Result<String, DomainError>;

    /// Mark the organization's contact email as verified
    ///
    /// Setting an already set flag succeeds without change.
    async fn set_email_verified(&self, id: OrganizationId) -> Result<(), DomainError>;

    /// Create an organization
    ///
    /// # Returns
    /// * `Ok(Organization)` - The stored organization with its assigned id
    /// * `Err(DomainError::Conflict)` - The contact email is already registered
    async fn create(&self, organization: NewOrganization) -> Result<Organization, DomainError>;

    /// Find an organization by id
    async fn find_by_id(&self, id: OrganizationId) -> Result<Option<Organization>, DomainError>;

    /// Find the first organization registered under a domain name
    ///
    /// Domain names are stored lowercase, so `domain_name` is expected in
    /// that form.
    async fn find_by_domain_name(&self, domain_name: &str) -> Result<Option<Organization>, DomainError>;

    /// One page of organizations ordered by name, then id
    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Organization>, DomainError>;
}
