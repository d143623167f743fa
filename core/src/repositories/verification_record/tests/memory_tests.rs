//! Unit tests for the in-memory verification record store

use chrono::{Duration, Utc};

use crate::domain::entities::organization::OrganizationId;
use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::{DomainError, OtpError};
use crate::repositories::verification_record::{
    InMemoryVerificationRecordRepository, VerificationRecordRepository,
};

#[tokio::test]
async fn test_create_and_find() {
    let repo = InMemoryVerificationRecordRepository::new();
    let org = OrganizationId(1);
    let record = VerificationRecord::new(org, "123456", Utc::now());

    repo.create(record.clone()).await.unwrap();

    let found = repo.find(org, "123456").await.unwrap();
    assert_eq!(found, Some(record));

    // Right organization, wrong code
    assert!(repo.find(org, "654321").await.unwrap().is_none());
    // Right code, wrong organization
    assert!(repo.find(OrganizationId(2), "123456").await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_replaces_outstanding_record() {
    let repo = InMemoryVerificationRecordRepository::new();
    let org = OrganizationId(1);

    repo.create(VerificationRecord::new(org, "111111", Utc::now())).await.unwrap();
    repo.create(VerificationRecord::new(org, "222222", Utc::now())).await.unwrap();

    assert!(repo.find(org, "111111").await.unwrap().is_none());
    assert!(repo.find(org, "222222").await.unwrap().is_some());
    assert_eq!(repo.outstanding_count().await, 1);
    assert_eq!(repo.count_issuances(org).await.unwrap(), 2);
}

#[tokio::test]
async fn test_code_unique_across_organizations() {
    let repo = InMemoryVerificationRecordRepository::new();

    repo.create(VerificationRecord::new(OrganizationId(1), "777777", Utc::now()))
        .await
        .unwrap();
    let result = repo
        .create(VerificationRecord::new(OrganizationId(2), "777777", Utc::now()))
        .await;

    assert!(matches!(result, Err(DomainError::Otp(OtpError::AlreadyExists))));
    assert_eq!(repo.count_issuances(OrganizationId(2)).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_does_not_lower_issuance_count() {
    let repo = InMemoryVerificationRecordRepository::new();
    let org = OrganizationId(5);
    repo.create(VerificationRecord::new(org, "135790", Utc::now())).await.unwrap();

    assert!(repo.delete_by_organization(org).await.unwrap());
    assert!(!repo.delete_by_organization(org).await.unwrap());
    assert_eq!(repo.count_issuances(org).await.unwrap(), 1);
    assert!(!repo.code_exists("135790").await.unwrap());
}

#[tokio::test]
async fn test_delete_issued_before() {
    let repo = InMemoryVerificationRecordRepository::new();
    let now = Utc::now();

    repo.create(VerificationRecord::new(OrganizationId(1), "100000", now - Duration::hours(2)))
        .await
        .unwrap();
    repo.create(VerificationRecord::new(OrganizationId(2), "200000", now))
        .await
        .unwrap();

    let deleted = repo.delete_issued_before(now - Duration::hours(1)).await.unwrap();

    assert_eq!(deleted, 1);
    assert!(repo.find_by_organization(OrganizationId(1)).await.unwrap().is_none());
    assert!(repo.find_by_organization(OrganizationId(2)).await.unwrap().is_some());
    assert_eq!(repo.count_issuances(OrganizationId(1)).await.unwrap(), 1);
}

#[tokio::test]
async fn test_failure_injection() {
    let repo = InMemoryVerificationRecordRepository::new();
    repo.set_should_fail(true);

    let result = repo.count_issuances(OrganizationId(1)).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}
