//! Email Service Interface
//!
//! Defines the trait for email provider implementations.

use async_trait::async_trait;

use crate::InfrastructureError;

/// A plain-text email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Email service trait for sending messages
///
/// Implementations include:
/// - HTTP JSON provider API
/// - Mock implementation for development
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send an email
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider identifier of the accepted message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Send a verification code to a contact address
    async fn send_verification_code(
        &self,
        to: &str,
        code: &str,
        expiry_seconds: i64,
    ) -> Result<String, InfrastructureError> {
        let message = verification_message(to, code, expiry_seconds);
        self.send_email(&message).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}

/// Build the verification email for `code`
pub fn verification_message(to: &str, code: &str, expiry_seconds: i64) -> EmailMessage {
    let validity = if expiry_seconds >= 60 && expiry_seconds % 60 == 0 {
        let minutes = expiry_seconds / 60;
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    } else {
        format!("{} seconds", expiry_seconds)
    };

    EmailMessage {
        to: to.to_string(),
        subject: "Verify your organization contact email".to_string(),
        body: format!(
            "Your OrgVerify verification code is: {}. This code will expire in {}.",
            code, validity
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_message_minutes() {
        let message = verification_message("admin@acme.com", "123456", 120);
        assert_eq!(message.to, "admin@acme.com");
        assert!(message.body.contains("123456"));
        assert!(message.body.contains("2 minutes"));
    }

    #[test]
    fn test_verification_message_seconds() {
        let message = verification_message("admin@acme.com", "123456", 90);
        assert!(message.body.contains("90 seconds"));

        let single = verification_message("admin@acme.com", "123456", 60);
        assert!(single.body.contains("1 minute."));
    }
}
