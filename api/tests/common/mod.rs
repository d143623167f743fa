//! Shared fixtures for the route tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use ov_api::routes::organizations::AppState;
use ov_core::domain::entities::organization::NewOrganization;
use ov_core::repositories::{InMemoryOrganizationRepository, InMemoryVerificationRecordRepository};
use ov_core::services::{Clock, EmailServiceTrait, OrganizationService, OtpService, OtpServiceConfig};

pub type TestState = AppState<InMemoryVerificationRecordRepository, InMemoryOrganizationRepository, RecordingEmailService>;

/// Email dispatcher that keeps every code it was asked to send
#[derive(Default)]
pub struct RecordingEmailService {
    sent: Mutex<Vec<(String, String)>>,
    should_fail: AtomicBool,
}

impl RecordingEmailService {
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_code(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, code)| code.clone())
    }

    pub fn last_recipient(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(to, _)| to.clone())
    }
}

#[async_trait]
impl EmailServiceTrait for RecordingEmailService {
    async fn send_verification_email(&self, to: &str, code: &str) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("provider unavailable".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((to.to_string(), code.to_string()));
        Ok(format!("test-msg-{}", sent.len()))
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::seconds(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub email: Arc<RecordingEmailService>,
    pub clock: Arc<ManualClock>,
    pub organizations: Arc<InMemoryOrganizationRepository>,
}

/// Services over in-memory storage with the default policy
/// (6 digits, 120 second expiry, 3 issuances)
pub fn test_context() -> TestContext {
    let records = Arc::new(InMemoryVerificationRecordRepository::new());
    let organizations = Arc::new(InMemoryOrganizationRepository::new());
    let email = Arc::new(RecordingEmailService::default());
    let clock = Arc::new(ManualClock::new());

    let otp_service = Arc::new(
        OtpService::new(
            records,
            organizations.clone(),
            email.clone(),
            OtpServiceConfig::default(),
        )
        .with_clock(clock.clone()),
    );
    let organization_service = Arc::new(OrganizationService::new(organizations.clone(), otp_service.clone()));

    TestContext {
        state: web::Data::new(AppState {
            otp_service,
            organization_service,
        }),
        email,
        clock,
        organizations,
    }
}

/// Register through the service layer and return the new organization id
pub async fn register_organization(ctx: &TestContext, email: &str) -> i64 {
    let result = ctx
        .state
        .organization_service
        .register(NewOrganization::new("Acme Ltd", email))
        .await
        .unwrap();
    assert!(result.code_dispatched);
    result.organization.id.value()
}
