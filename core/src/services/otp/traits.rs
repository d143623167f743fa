//! Trait for notification dispatch integration

use async_trait::async_trait;

/// Trait for email delivery of verification codes
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Send a verification code to `to`, returning the provider message id
    async fn send_verification_email(&self, to: &str, code: &str) -> Result<String, String>;
}
