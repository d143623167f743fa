//! In-memory implementation of VerificationRecordRepository
//!
//! Used by unit tests and by the `memory` storage backend for local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::organization::OrganizationId;
use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::{DomainError, OtpError};

use super::r#trait::VerificationRecordRepository;

#[derive(Default)]
struct Store {
    /// Outstanding record per organization
    records: HashMap<OrganizationId, VerificationRecord>,
    /// Issuance history, never decremented
    issuances: HashMap<OrganizationId, u32>,
}

/// Verification record store backed by process memory
#[derive(Clone)]
pub struct InMemoryVerificationRecordRepository {
    store: Arc<RwLock<Store>>,
    should_fail: Arc<AtomicBool>,
}

impl InMemoryVerificationRecordRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail with an internal error
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Insert a record without touching the issuance history
    ///
    /// Lets tests stage a record held by another organization or simulate
    /// a concurrent writer.
    pub async fn insert_raw(&self, record: VerificationRecord) {
        let mut store = self.store.write().await;
        store.records.insert(record.organization_id, record);
    }

    /// Overwrite the issuance history of an organization
    pub async fn set_issuance_count(&self, organization_id: OrganizationId, count: u32) {
        let mut store = self.store.write().await;
        store.issuances.insert(organization_id, count);
    }

    /// Number of outstanding records
    pub async fn outstanding_count(&self) -> usize {
        self.store.read().await.records.len()
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Verification record store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryVerificationRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRecordRepository for InMemoryVerificationRecordRepository {
    async fn create(&self, record: VerificationRecord) -> Result<VerificationRecord, DomainError> {
        self.check_failure()?;
        let mut store = self.store.write().await;

        let taken = store
            .records
            .values()
            .any(|r| r.code == record.code && r.organization_id != record.organization_id);
        if taken {
            return Err(OtpError::AlreadyExists.into());
        }

        store.records.insert(record.organization_id, record.clone());
        *store.issuances.entry(record.organization_id).or_insert(0) += 1;
        Ok(record)
    }

    async fn find(
        &self,
        organization_id: OrganizationId,
        code: &str,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        self.check_failure()?;
        let store = self.store.read().await;
        Ok(store
            .records
            .get(&organization_id)
            .filter(|r| r.code == code)
            .cloned())
    }

    async fn find_by_organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<VerificationRecord>, DomainError> {
        self.check_failure()?;
        let store = self.store.read().await;
        Ok(store.records.get(&organization_id).cloned())
    }

    async fn count_issuances(&self, organization_id: OrganizationId) -> Result<u32, DomainError> {
        self.check_failure()?;
        let store = self.store.read().await;
        Ok(store.issuances.get(&organization_id).copied().unwrap_or(0))
    }

    async fn delete_by_organization(&self, organization_id: OrganizationId) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut store = self.store.write().await;
        Ok(store.records.remove(&organization_id).is_some())
    }

    async fn code_exists(&self, code: &str) -> Result<bool, DomainError> {
        self.check_failure()?;
        let store = self.store.read().await;
        Ok(store.records.values().any(|r| r.code == code))
    }

    async fn delete_issued_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_failure()?;
        let mut store = self.store.write().await;
        let initial_count = store.records.len();

        store.records.retain(|_, record| record.issued_at >= cutoff);

        Ok((initial_count - store.records.len()) as u64)
    }
}
