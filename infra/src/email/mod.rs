//! Email Service Module
//!
//! This module provides email delivery of verification codes.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all email providers
//! - **Mock Implementation**: Log output for development
//! - **HTTP Provider**: JSON API delivery with retry and exponential backoff
//! - **Core Adapter**: Bridges any provider to the core dispatcher trait
//! - **Security**: Address masking in logs

pub mod email_service;
pub mod http_email;
pub mod mock_email;
pub mod trait_adapter;

// Re-export commonly used types
pub use email_service::{verification_message, EmailMessage, EmailService};
pub use http_email::{HttpEmailConfig, HttpEmailService};
pub use mock_email::MockEmailService;
pub use trait_adapter::EmailServiceAdapter;

use ov_shared::config::EmailConfig;

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// # Returns
///
/// * `Ok(Box<dyn EmailService>)` - The configured provider
/// * `Err(InfrastructureError::Config)` - Unknown provider or invalid HTTP settings
pub fn create_email_service(config: &EmailConfig) -> Result<Box<dyn EmailService>, InfrastructureError> {
    match config.provider.as_str() {
        "mock" => {
            tracing::warn!("Using mock email service; verification codes are only logged");
            Ok(Box::new(MockEmailService::new()))
        }
        "http" => {
            let service = HttpEmailService::new(HttpEmailConfig::from(config))?;
            Ok(Box::new(service))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown email provider '{}'",
            other
        ))),
    }
}
