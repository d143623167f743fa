//! In-memory implementation of OrganizationRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::organization::{NewOrganization, Organization, OrganizationId};
use crate::errors::DomainError;

use super::r#trait::OrganizationRepository;

/// Organization directory backed by process memory
#[derive(Clone)]
pub struct InMemoryOrganizationRepository {
    organizations: Arc<RwLock<HashMap<OrganizationId, Organization>>>,
    next_id: Arc<AtomicI64>,
    should_fail: Arc<AtomicBool>,
}

impl InMemoryOrganizationRepository {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            organizations: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail with an internal error
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Store an organization as-is, keeping its id
    pub async fn insert(&self, organization: Organization) {
        self.next_id
            .fetch_max(organization.id.value() + 1, Ordering::SeqCst);
        let mut organizations = self.organizations.write().await;
        organizations.insert(organization.id, organization);
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Organization directory unavailable".to_string(),
            });
        }
        Ok(())
    }

    fn not_found(id: OrganizationId) -> DomainError {
        DomainError::NotFound {
            resource: format!("organization {}", id),
        }
    }
}

impl Default for InMemoryOrganizationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrganizationRepository for InMemoryOrganizationRepository {
    async fn exists(&self, id: OrganizationId) -> Result<bool, DomainError> {
        self.check_failure()?;
        Ok(self.organizations.read().await.contains_key(&id))
    }

    async fn get_contact_email(&self, id: OrganizationId) -> Result<String, DomainError> {
        self.check_failure()?;
        let organizations = self.organizations.read().await;
        organizations
            .get(&id)
            .map(|o| o.contact_email.clone())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn set_email_verified(&self, id: OrganizationId) -> Result<(), DomainError> {
        self.check_failure()?;
        let mut organizations = self.organizations.write().await;
        match organizations.get_mut(&id) {
            Some(organization) => {
                organization.is_email_verified = true;
                Ok(())
            }
            None => Err(Self::not_found(id)),
        }
    }

    async fn create(&self, organization: NewOrganization) -> Result<Organization, DomainError> {
        self.check_failure()?;
        let mut organizations = self.organizations.write().await;

        if organizations
            .values()
            .any(|o| o.contact_email.eq_ignore_ascii_case(&organization.contact_email))
        {
            return Err(DomainError::Conflict {
                message: format!(
                    "Contact email {} is already registered",
                    ov_shared::utils::mask_email(&organization.contact_email)
                ),
            });
        }

        let id = OrganizationId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let created = Organization::new(id, organization, Utc::now());
        organizations.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: OrganizationId) -> Result<Option<Organization>, DomainError> {
        self.check_failure()?;
        Ok(self.organizations.read().await.get(&id).cloned())
    }

    async fn find_by_domain_name(&self, domain_name: &str) -> Result<Option<Organization>, DomainError> {
        self.check_failure()?;
        let organizations = self.organizations.read().await;
        Ok(organizations
            .values()
            .filter(|o| o.domain_name.as_deref() == Some(domain_name))
            .min_by_key(|o| o.id)
            .cloned())
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Organization>, DomainError> {
        self.check_failure()?;
        let organizations = self.organizations.read().await;

        let mut page: Vec<Organization> = organizations.values().cloned().collect();
        page.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        Ok(page
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }
}
