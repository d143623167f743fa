//! Organization registration service

use std::sync::Arc;

use ov_shared::utils::{is_valid_email, mask_email};

use crate::domain::entities::organization::{NewOrganization, Organization, OrganizationId};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{OrganizationRepository, VerificationRecordRepository};
use crate::services::otp::{EmailServiceTrait, OtpService};

/// Maximum accepted organization name length, in characters
const MAX_NAME_LENGTH: usize = 255;

/// Largest page a listing returns
pub const MAX_PAGE_SIZE: u32 = 100;

/// Outcome of registering an organization
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    pub organization: Organization,
    /// Whether the first code reached the dispatcher
    ///
    /// When `false` the organization still exists and a code can be
    /// requested through resend.
    pub code_dispatched: bool,
}

/// Creates organizations and starts their contact-email verification
pub struct OrganizationService<V, O, E>
where
    V: VerificationRecordRepository,
    O: OrganizationRepository,
    E: EmailServiceTrait,
{
    organizations: Arc<O>,
    otp_service: Arc<OtpService<V, O, E>>,
}

impl<V, O, E> OrganizationService<V, O, E>
where
    V: VerificationRecordRepository,
    O: OrganizationRepository,
    E: EmailServiceTrait,
{
    pub fn new(organizations: Arc<O>, otp_service: Arc<OtpService<V, O, E>>) -> Self {
        Self {
            organizations,
            otp_service,
        }
    }

    /// Register an organization and send its first verification code
    ///
    /// # Returns
    /// * `Ok(RegistrationResult)` - The created organization
    /// * `Err(DomainError::Validation)` - Name or contact email malformed
    /// * `Err(DomainError::Conflict)` - Contact email already registered
    pub async fn register(&self, new_organization: NewOrganization) -> DomainResult<RegistrationResult> {
        let fields = new_organization.normalized();
        Self::validate(&fields)?;

        let organization = self
            .organizations
            .create(fields)
            .await
            .map_err(|e| Self::fault("register", e))?;
        tracing::info!(
            organization_id = %organization.id,
            email = %mask_email(&organization.contact_email),
            event = "organization_created",
            "Organization registered"
        );

        let code_dispatched = match self.otp_service.issue_record(organization.id).await {
            Ok(record) => self
                .otp_service
                .dispatch(&organization.contact_email, &record)
                .await
                .is_ok(),
            Err(_) => false,
        };

        if !code_dispatched {
            tracing::warn!(
                organization_id = %organization.id,
                event = "initial_code_not_sent",
                "Organization created without a delivered verification code"
            );
        }

        Ok(RegistrationResult {
            organization,
            code_dispatched,
        })
    }

    /// Fetch one organization
    ///
    /// # Returns
    /// * `Ok(Organization)` - The stored organization
    /// * `Err(DomainError::NotFound)` - No such organization
    pub async fn get_organization(&self, id: OrganizationId) -> DomainResult<Organization> {
        self.organizations
            .find_by_id(id)
            .await
            .map_err(|e| Self::fault("get_organization", e))?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("organization {}", id),
            })
    }

    /// Fetch the first organization registered under a domain name
    ///
    /// The lookup is case-insensitive.
    pub async fn find_by_domain_name(&self, domain_name: &str) -> DomainResult<Organization> {
        let domain_name = domain_name.trim().to_lowercase();
        if domain_name.is_empty() {
            return Err(DomainError::Validation {
                message: "Domain name must not be empty".to_string(),
            });
        }

        self.organizations
            .find_by_domain_name(&domain_name)
            .await
            .map_err(|e| Self::fault("find_by_domain_name", e))?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("organization with domain {}", domain_name),
            })
    }

    /// One page of organizations ordered by name
    ///
    /// `limit` is clamped to `1..=MAX_PAGE_SIZE`.
    pub async fn list_organizations(&self, limit: u32, offset: u32) -> DomainResult<Vec<Organization>> {
        self.organizations
            .list(limit.clamp(1, MAX_PAGE_SIZE), offset)
            .await
            .map_err(|e| Self::fault("list_organizations", e))
    }

    fn fault(operation: &str, err: DomainError) -> DomainError {
        if let DomainError::Internal { message } = &err {
            tracing::error!(
                operation = operation,
                error = %message,
                event = "organization_internal_error",
                "Organization directory request failed"
            );
        }
        err
    }

    fn validate(fields: &NewOrganization) -> DomainResult<()> {
        let name_length = fields.name.chars().count();
        if name_length == 0 || name_length > MAX_NAME_LENGTH {
            return Err(DomainError::Validation {
                message: format!("Organization name must be 1 to {} characters", MAX_NAME_LENGTH),
            });
        }
        if !is_valid_email(&fields.contact_email) {
            return Err(DomainError::Validation {
                message: "Invalid contact email format".to_string(),
            });
        }
        Ok(())
    }
}
