//! MySQL implementation of the OrganizationRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ov_core::domain::entities::organization::{NewOrganization, Organization, OrganizationId};
use ov_core::errors::DomainError;
use ov_core::repositories::OrganizationRepository;
use ov_shared::utils::mask_email;

use super::{db_error, is_unique_violation};

/// MySQL implementation of OrganizationRepository
pub struct MySqlOrganizationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOrganizationRepository {
    /// Create a new MySQL organization repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn not_found(id: OrganizationId) -> DomainError {
        DomainError::NotFound {
            resource: format!("organization {}", id),
        }
    }

    /// Convert database row to Organization entity
    fn row_to_organization(row: &sqlx::mysql::MySqlRow) -> Result<Organization, DomainError> {
        let id: i64 = row.try_get("id").map_err(|e| db_error("Failed to get id", e))?;

        Ok(Organization {
            id: OrganizationId(id),
            name: row.try_get("name").map_err(|e| db_error("Failed to get name", e))?,
            contact_email: row
                .try_get("contact_email")
                .map_err(|e| db_error("Failed to get contact_email", e))?,
            domain_name: row
                .try_get("domain_name")
                .map_err(|e| db_error("Failed to get domain_name", e))?,
            is_email_verified: row
                .try_get("is_email_verified")
                .map_err(|e| db_error("Failed to get is_email_verified", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| db_error("Failed to get created_at", e))?,
        })
    }
}

#[async_trait]
impl OrganizationRepository for MySqlOrganizationRepository {
    async fn exists(&self, id: OrganizationId) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS org_count FROM organizations WHERE id = ?")
            .bind(id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check organization existence", e))?;

        let count: i64 = row
            .try_get("org_count")
            .map_err(|e| db_error("Failed to get org_count", e))?;

        Ok(count > 0)
    }

    async fn get_contact_email(&self, id: OrganizationId) -> Result<String, DomainError> {
        let row = sqlx::query("SELECT contact_email FROM organizations WHERE id = ?")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch contact email", e))?
            .ok_or_else(|| Self::not_found(id))?;

        row.try_get("contact_email")
            .map_err(|e| db_error("Failed to get contact_email", e))
    }

    async fn set_email_verified(&self, id: OrganizationId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE organizations SET is_email_verified = TRUE WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update verification flag", e))?;

        // MySQL reports zero affected rows when the flag was already set
        if result.rows_affected() == 0 && !self.exists(id).await? {
            return Err(Self::not_found(id));
        }
        Ok(())
    }

    async fn create(&self, organization: NewOrganization) -> Result<Organization, DomainError> {
        let created_at = Utc::now();
        let query = r#"
            INSERT INTO organizations (
                name, contact_email, domain_name, is_email_verified, created_at
            ) VALUES (?, ?, ?, FALSE, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&organization.name)
            .bind(&organization.contact_email)
            .bind(&organization.domain_name)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Conflict {
                        message: format!(
                            "Contact email {} is already registered",
                            mask_email(&organization.contact_email)
                        ),
                    }
                } else {
                    db_error("Failed to create organization", e)
                }
            })?;

        let id = i64::try_from(result.last_insert_id()).map_err(|_| DomainError::Internal {
            message: "Organization id out of range".to_string(),
        })?;

        Ok(Organization::new(OrganizationId(id), organization, created_at))
    }

    async fn find_by_id(&self, id: OrganizationId) -> Result<Option<Organization>, DomainError> {
        let query = r#"
            SELECT id, name, contact_email, domain_name, is_email_verified, created_at
            FROM organizations
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find organization", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_organization(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_domain_name(&self, domain_name: &str) -> Result<Option<Organization>, DomainError> {
        let query = r#"
            SELECT id, name, contact_email, domain_name, is_email_verified, created_at
            FROM organizations
            WHERE domain_name = ?
            ORDER BY id ASC
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(domain_name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find organization by domain name", e))?;

        result.map(|row| Self::row_to_organization(&row)).transpose()
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<Vec<Organization>, DomainError> {
        let query = r#"
            SELECT id, name, contact_email, domain_name, is_email_verified, created_at
            FROM organizations
            ORDER BY name ASC, id ASC
            LIMIT ? OFFSET ?
        "#;

        let rows = sqlx::query(query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list organizations", e))?;

        rows.iter().map(Self::row_to_organization).collect()
    }
}
