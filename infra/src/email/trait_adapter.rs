//! Email Service Trait Adapter
//!
//! Implements the core EmailServiceTrait for any infrastructure email
//! provider, bridging the infrastructure implementation with the core
//! dispatcher trait.

use async_trait::async_trait;
use ov_core::services::otp::EmailServiceTrait;

use super::email_service::EmailService;

/// Adapter that implements the core EmailServiceTrait
pub struct EmailServiceAdapter {
    inner: Box<dyn EmailService>,
    /// Validity stated in the message body
    expiry_seconds: i64,
}

impl EmailServiceAdapter {
    /// Create a new adapter around a provider
    pub fn new(inner: Box<dyn EmailService>, expiry_seconds: i64) -> Self {
        Self {
            inner,
            expiry_seconds,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl EmailServiceTrait for EmailServiceAdapter {
    async fn send_verification_email(&self, to: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(to, code, self.expiry_seconds)
            .await
            .map_err(|e| e.to_string())
    }
}
