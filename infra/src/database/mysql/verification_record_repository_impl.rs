//! MySQL implementation of the VerificationRecordRepository trait.
//!
//! Outstanding codes live in `otp_verifications`, keyed by organization
//! with a unique code column. Every issuance is also appended to
//! `otp_issuances`, which is what the lifetime cap counts.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use ov_core::domain::entities::organization::OrganizationId;
use ov_core::domain::entities::verification_record::VerificationRecord;
use ov_core::errors::{DomainError, OtpError};
use ov_core::repositories::VerificationRecordRepository;

use super::{db_error, is_foreign_key_violation, is_unique_violation};

/// MySQL implementation of VerificationRecordRepository
pub struct MySqlVerificationRecordRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationRecordRepository {
    /// Create a new MySQL verification record repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to VerificationRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<VerificationRecord, DomainError> {
        let organization_id: i64 = row
            .try_get("organization_id")
            .map_err(|e| db_error("Failed to get organization_id", e))?;

        Ok(VerificationRecord {
            organization_id: OrganizationId(organization_id),
            code: row
                .try_get("code")
                .map_err(|e| db_error("Failed to get code", e))?,
            issued_at: row
                .try_get::<DateTime<Utc>, _>("issued_at")
                .map_err(|e| db_error("Failed to get issued_at", e))?,
        })
    }
}

#[async_trait]
impl VerificationRecordRepository for MySqlVerificationRecordRepository {
    async fn create(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        sqlx::query("DELETE FROM otp_verifications WHERE organization_id = ?")
            .bind(record.organization_id.value())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to delete previous verification record", e))?;

        let inserted = sqlx::query(
            "INSERT INTO otp_verifications (organization_id, code, issued_at) VALUES (?, ?, ?)",
        )
        .bind(record.organization_id.value())
        .bind(&record.code)
        .bind(record.issued_at)
        .execute(&mut *tx)
        .await;

        // Dropping the transaction rolls back the delete
        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => return Err(OtpError::AlreadyExists.into()),
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(DomainError::NotFound {
                    resource: format!("organization {}", record.organization_id),
                })
            }
            Err(e) => return Err(db_error("Failed to insert verification record", e)),
        }

        sqlx::query("INSERT INTO otp_issuances (organization_id, issued_at) VALUES (?, ?)")
            .bind(record.organization_id.value())
            .bind(record.issued_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to append issuance", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit verification record", e))?;

        Ok(record)
    }

    async fn find(
        &self,
        organization_id: OrganizationId,
        code: &str,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        let query = r#"
            SELECT organization_id, code, issued_at
            FROM otp_verifications
            WHERE organization_id = ? AND code = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(organization_id.value())
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find verification record", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        let query = r#"
            SELECT organization_id, code, issued_at
            FROM otp_verifications
            WHERE organization_id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(organization_id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find verification record", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn count_issuances(&self, organization_id: OrganizationId) -> Result<u32, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS issuance_count FROM otp_issuances WHERE organization_id = ?")
            .bind(organization_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count issuances", e))?;

        let count: i64 = row
            .try_get("issuance_count")
            .map_err(|e| db_error("Failed to get issuance_count", e))?;

        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn delete_by_organization(&self, organization_id: OrganizationId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM otp_verifications WHERE organization_id = ?")
            .bind(organization_id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete verification record", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn code_exists(&self, code: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS code_count FROM otp_verifications WHERE code = ?")
            .bind(code)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check code existence", e))?;

        let count: i64 = row
            .try_get("code_count")
            .map_err(|e| db_error("Failed to get code_count", e))?;

        Ok(count > 0)
    }

    async fn delete_issued_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM otp_verifications WHERE issued_at < ?")
            .bind(cutoff)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete stale verification records", e))?;

        Ok(result.rows_affected())
    }
}
