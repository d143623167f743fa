//! Main OTP service implementation

use std::sync::Arc;

use ov_shared::utils::mask_email;

use crate::domain::entities::organization::OrganizationId;
use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::{OtpError, OtpResult};
use crate::repositories::{OrganizationRepository, VerificationRecordRepository};

use super::clock::{Clock, SystemClock};
use super::code_generator::{CodeGenerator, OsRandomSource, RandomSource};
use super::config::OtpServiceConfig;
use super::traits::EmailServiceTrait;
use super::types::{SendCodeResult, VerificationStatus, VerificationSummary};

/// OTP service owning every rule of the contact-email verification workflow
pub struct OtpService<V, O, E>
where
    V: VerificationRecordRepository,
    O: OrganizationRepository,
    E: EmailServiceTrait,
{
    /// Outstanding records and issuance history
    records: Arc<V>,
    /// Organization directory
    organizations: Arc<O>,
    /// Email dispatcher
    email_service: Arc<E>,
    /// Unique code generation
    generator: CodeGenerator<V>,
    /// Time source for issuance and expiry
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<V, O, E> OtpService<V, O, E>
where
    V: VerificationRecordRepository,
    O: OrganizationRepository,
    E: EmailServiceTrait,
{
    /// Create a new OTP service using the OS random source and system clock
    pub fn new(
        records: Arc<V>,
        organizations: Arc<O>,
        email_service: Arc<E>,
        mut config: OtpServiceConfig,
    ) -> Self {
        let generator = CodeGenerator::new(
            records.clone(),
            Arc::new(OsRandomSource),
            config.code_length,
            config.max_generation_attempts,
        );
        config.code_length = generator.code_length();

        Self {
            records,
            organizations,
            email_service,
            generator,
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the random source used for code generation
    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.generator = CodeGenerator::new(
            self.records.clone(),
            random,
            self.config.code_length,
            self.config.max_generation_attempts,
        );
        self
    }

    /// Replace the clock used for issuance timestamps and expiry
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a code for an existing organization
    ///
    /// Replaces any outstanding record. The code is not dispatched.
    ///
    /// # Returns
    /// * `Ok(VerificationRecord)` - The persisted record
    /// * `Err(OtpError::NotFound)` - The organization does not exist
    /// * `Err(OtpError::Internal)` - Generation or storage failed
    pub async fn issue_code(&self, organization_id: OrganizationId) -> OtpResult<VerificationRecord> {
        let exists = self
            .organizations
            .exists(organization_id)
            .await
            .map_err(|e| self.fault("issue_code", organization_id, e.into()))?;
        if !exists {
            return Err(OtpError::NotFound);
        }

        self.issue_record(organization_id).await
    }

    /// Issue a code without checking the directory
    ///
    /// Used right after the organization has been created. A code taken
    /// concurrently by another organization is replaced by a fresh one.
    pub(crate) async fn issue_record(&self, organization_id: OrganizationId) -> OtpResult<VerificationRecord> {
        for attempt in 1..=self.config.max_generation_attempts {
            let code = self
                .generator
                .generate()
                .await
                .map_err(|e| self.fault("issue_code", organization_id, e))?;
            let record = VerificationRecord::new(organization_id, code, self.clock.now());

            match self.records.create(record).await.map_err(OtpError::from) {
                Ok(stored) => {
                    tracing::info!(
                        organization_id = %organization_id,
                        event = "otp_generated",
                        "Issued new verification code"
                    );
                    return Ok(stored);
                }
                Err(OtpError::AlreadyExists) => {
                    tracing::warn!(
                        organization_id = %organization_id,
                        attempt = attempt,
                        event = "otp_code_taken",
                        "Code was taken concurrently, regenerating"
                    );
                }
                Err(e) => return Err(self.fault("issue_code", organization_id, e)),
            }
        }

        Err(self.fault(
            "issue_code",
            organization_id,
            OtpError::internal("Code kept colliding with concurrent issuances"),
        ))
    }

    /// Verify a submitted code
    ///
    /// On success the organization is marked verified and the record is
    /// consumed. A wrong code and a missing record are indistinguishable.
    ///
    /// # Returns
    /// * `Ok(())` - Verified by this call
    /// * `Err(OtpError::NotFound)` - No outstanding record with this code
    /// * `Err(OtpError::Expired)` - The code is past its expiry window; the record is kept
    pub async fn verify_code(&self, organization_id: OrganizationId, code: &str) -> OtpResult<()> {
        let record = self
            .records
            .find(organization_id, code)
            .await
            .map_err(|e| self.fault("verify_code", organization_id, e.into()))?
            .ok_or(OtpError::NotFound)?;

        let now = self.clock.now();
        if record.is_expired_at(now, self.config.expiry_window()) {
            tracing::info!(
                organization_id = %organization_id,
                age_seconds = record.age_at(now).num_seconds(),
                event = "otp_expired",
                "Verification code submitted after expiry"
            );
            return Err(OtpError::Expired);
        }

        self.organizations
            .set_email_verified(organization_id)
            .await
            .map_err(|e| self.fault("verify_code", organization_id, e.into()))?;

        let deleted = self
            .records
            .delete_by_organization(organization_id)
            .await
            .map_err(|e| self.fault("verify_code", organization_id, e.into()))?;
        if !deleted {
            // Another request consumed the record first
            return Err(OtpError::NotFound);
        }

        tracing::info!(
            organization_id = %organization_id,
            event = "otp_verified",
            "Contact email verified"
        );
        Ok(())
    }

    /// Issue and dispatch a replacement code
    ///
    /// # Returns
    /// * `Ok(SendCodeResult)` - The new record and dispatch details
    /// * `Err(OtpError::AttemptExceeded)` - The issuance cap is reached
    /// * `Err(OtpError::NotFound)` - The organization does not exist
    /// * `Err(OtpError::Internal)` - Storage or dispatch failed; a stored record is kept
    pub async fn resend_code(&self, organization_id: OrganizationId) -> OtpResult<SendCodeResult> {
        let count = self
            .records
            .count_issuances(organization_id)
            .await
            .map_err(|e| self.fault("resend_code", organization_id, e.into()))?;

        if count >= self.config.max_issuances {
            tracing::warn!(
                organization_id = %organization_id,
                issuance_count = count,
                event = "otp_attempts_exceeded",
                "Verification code issuance cap reached"
            );
            return Err(OtpError::AttemptExceeded);
        }

        if count == 0 {
            let exists = self
                .organizations
                .exists(organization_id)
                .await
                .map_err(|e| self.fault("resend_code", organization_id, e.into()))?;
            if !exists {
                return Err(OtpError::NotFound);
            }
        }

        let contact_email = self
            .organizations
            .get_contact_email(organization_id)
            .await
            .map_err(|e| self.fault("resend_code", organization_id, e.into()))?;

        let record = self.issue_record(organization_id).await?;
        let message_id = self.dispatch(&contact_email, &record).await?;

        let issuance_count = count + 1;
        Ok(SendCodeResult {
            record,
            message_id,
            issuance_count,
            remaining_issuances: self.config.max_issuances.saturating_sub(issuance_count),
        })
    }

    /// Report where the organization stands in the verification workflow
    pub async fn verification_status(&self, organization_id: OrganizationId) -> OtpResult<VerificationSummary> {
        let organization = self
            .organizations
            .find_by_id(organization_id)
            .await
            .map_err(|e| self.fault("verification_status", organization_id, e.into()))?
            .ok_or(OtpError::NotFound)?;

        let issuance_count = self
            .records
            .count_issuances(organization_id)
            .await
            .map_err(|e| self.fault("verification_status", organization_id, e.into()))?;
        let outstanding = self
            .records
            .find_by_organization(organization_id)
            .await
            .map_err(|e| self.fault("verification_status", organization_id, e.into()))?;

        let status = if organization.is_email_verified {
            VerificationStatus::Verified
        } else if issuance_count >= self.config.max_issuances {
            VerificationStatus::Locked
        } else if outstanding.is_some() {
            VerificationStatus::PendingVerification
        } else {
            VerificationStatus::Unverified
        };

        Ok(VerificationSummary {
            status,
            issuance_count,
            remaining_issuances: self.config.max_issuances.saturating_sub(issuance_count),
            code_expires_at: outstanding.map(|r| r.expires_at(self.config.expiry_window())),
        })
    }

    /// Send a record's code to the contact address
    pub(crate) async fn dispatch(&self, contact_email: &str, record: &VerificationRecord) -> OtpResult<String> {
        let message_id = self
            .email_service
            .send_verification_email(contact_email, &record.code)
            .await
            .map_err(|e| {
                self.fault(
                    "dispatch",
                    record.organization_id,
                    OtpError::internal(format!("Failed to send verification email: {}", e)),
                )
            })?;

        tracing::info!(
            organization_id = %record.organization_id,
            email = %mask_email(contact_email),
            message_id = %message_id,
            event = "otp_dispatched",
            "Verification code sent"
        );
        Ok(message_id)
    }

    /// Log internal errors; business outcomes pass through quietly
    fn fault(&self, operation: &str, organization_id: OrganizationId, err: OtpError) -> OtpError {
        if err.is_internal() {
            tracing::error!(
                organization_id = %organization_id,
                operation = operation,
                error = %err,
                event = "otp_internal_error",
                "Verification workflow failed"
            );
        }
        err
    }
}
