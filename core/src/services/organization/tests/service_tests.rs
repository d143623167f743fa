//! Unit tests for organization registration

use std::sync::Arc;

use crate::domain::entities::organization::{NewOrganization, OrganizationId};
use crate::errors::DomainError;
use crate::repositories::{
    InMemoryOrganizationRepository, InMemoryVerificationRecordRepository, OrganizationRepository,
    VerificationRecordRepository,
};
use crate::services::organization::OrganizationService;
use crate::services::otp::{EmailServiceTrait, OtpService, OtpServiceConfig};

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

struct CountingEmailService {
    sent: AtomicUsize,
    should_fail: AtomicBool,
}

impl CountingEmailService {
    fn new(should_fail: bool) -> Self {
        Self {
            sent: AtomicUsize::new(0),
            should_fail: AtomicBool::new(should_fail),
        }
    }
}

#[async_trait]
impl EmailServiceTrait for CountingEmailService {
    async fn send_verification_email(&self, _to: &str, _code: &str) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Email provider error".to_string());
        }
        let n = self.sent.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("msg-{}", n))
    }
}

struct Setup {
    service: OrganizationService<
        InMemoryVerificationRecordRepository,
        InMemoryOrganizationRepository,
        CountingEmailService,
    >,
    records: Arc<InMemoryVerificationRecordRepository>,
    organizations: Arc<InMemoryOrganizationRepository>,
    email: Arc<CountingEmailService>,
}

fn setup(email_fails: bool) -> Setup {
    let records = Arc::new(InMemoryVerificationRecordRepository::new());
    let organizations = Arc::new(InMemoryOrganizationRepository::new());
    let email = Arc::new(CountingEmailService::new(email_fails));
    let otp = Arc::new(OtpService::new(
        records.clone(),
        organizations.clone(),
        email.clone(),
        OtpServiceConfig::default(),
    ));

    Setup {
        service: OrganizationService::new(organizations.clone(), otp),
        records,
        organizations,
        email,
    }
}

#[tokio::test]
async fn test_register_issues_and_sends_first_code() {
    let s = setup(false);

    let result = s
        .service
        .register(NewOrganization::new("Acme", "Admin@Acme.com"))
        .await
        .unwrap();

    assert!(result.code_dispatched);
    assert_eq!(result.organization.contact_email, "admin@acme.com");
    assert!(!result.organization.is_email_verified);
    assert_eq!(s.email.sent.load(Ordering::SeqCst), 1);
    assert_eq!(s.records.count_issuances(result.organization.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let s = setup(false);
    s.service
        .register(NewOrganization::new("Acme", "admin@acme.com"))
        .await
        .unwrap();

    let result = s
        .service
        .register(NewOrganization::new("Acme 2", "admin@acme.com"))
        .await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    assert_eq!(s.email.sent.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let s = setup(false);

    let bad_email = s.service.register(NewOrganization::new("Acme", "not-an-email")).await;
    assert!(matches!(bad_email, Err(DomainError::Validation { .. })));

    let blank_name = s.service.register(NewOrganization::new("   ", "admin@acme.com")).await;
    assert!(matches!(blank_name, Err(DomainError::Validation { .. })));

    assert!(!s.organizations.exists(1.into()).await.unwrap());
}

#[tokio::test]
async fn test_dispatch_failure_keeps_organization() {
    let s = setup(true);

    let result = s
        .service
        .register(NewOrganization::new("Acme", "admin@acme.com"))
        .await
        .unwrap();

    assert!(!result.code_dispatched);
    assert!(s.organizations.exists(result.organization.id).await.unwrap());
    // The record stays so the organization can still verify once delivery recovers
    assert!(s
        .records
        .find_by_organization(result.organization.id)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_register_counts_name_length_in_characters() {
    let s = setup(false);

    let accented = "\u{e9}".repeat(200);
    let result = s
        .service
        .register(NewOrganization::new(accented.clone(), "admin@acme.com"))
        .await
        .unwrap();
    assert_eq!(result.organization.name, accented);

    let too_long = s
        .service
        .register(NewOrganization::new("\u{e9}".repeat(256), "ops@acme.com"))
        .await;
    assert!(matches!(too_long, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_register_storage_failure_is_internal() {
    let s = setup(false);
    s.organizations.set_should_fail(true);

    let result = s
        .service
        .register(NewOrganization::new("Acme", "admin@acme.com"))
        .await;

    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert_eq!(s.email.sent.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_get_organization() {
    let s = setup(false);
    let created = s
        .service
        .register(NewOrganization::new("Acme", "admin@acme.com"))
        .await
        .unwrap()
        .organization;

    let fetched = s.service.get_organization(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let missing = s.service.get_organization(OrganizationId(99)).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_find_by_domain_name_ignores_case() {
    let s = setup(false);
    let created = s
        .service
        .register(NewOrganization::new("Acme", "admin@acme.com").with_domain_name("Acme.com"))
        .await
        .unwrap()
        .organization;

    let found = s.service.find_by_domain_name(" ACME.com ").await.unwrap();
    assert_eq!(found.id, created.id);

    let unknown = s.service.find_by_domain_name("globex.com").await;
    assert!(matches!(unknown, Err(DomainError::NotFound { .. })));

    let blank = s.service.find_by_domain_name("  ").await;
    assert!(matches!(blank, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_list_organizations_clamps_page_size() {
    let s = setup(false);
    for (name, email) in [("Globex", "ops@globex.com"), ("Acme", "admin@acme.com")] {
        s.service.register(NewOrganization::new(name, email)).await.unwrap();
    }

    let all = s.service.list_organizations(1000, 0).await.unwrap();
    assert_eq!(all.iter().map(|o| o.name.as_str()).collect::<Vec<_>>(), ["Acme", "Globex"]);

    // A zero limit still returns one entry
    let first = s.service.list_organizations(0, 0).await.unwrap();
    assert_eq!(first.len(), 1);
}
