//! HTTP Email Service Implementation
//!
//! Delivers messages through a JSON email provider API.
//!
//! ## Features
//!
//! - Bearer token authentication
//! - Automatic retry logic with exponential backoff
//! - No retry on client errors other than rate limiting
//! - Security: Address masking in logs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use ov_shared::config::EmailConfig;
use ov_shared::utils::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// HTTP email provider configuration
#[derive(Debug, Clone)]
pub struct HttpEmailConfig {
    /// Send endpoint
    pub api_url: String,
    /// Bearer token
    pub api_key: String,
    /// Sender address
    pub from_address: String,
    /// Maximum delivery attempts
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl From<&EmailConfig> for HttpEmailConfig {
    fn from(config: &EmailConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

/// Outcome of one delivery attempt
enum AttemptError {
    Retryable(String),
    Fatal(String),
}

/// Email service backed by an HTTP JSON API
pub struct HttpEmailService {
    client: Client,
    config: HttpEmailConfig,
}

impl HttpEmailService {
    /// Create a new HTTP email service
    pub fn new(config: HttpEmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_url.is_empty() || config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "HTTP email provider requires EMAIL_API_URL and EMAIL_API_KEY".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    async fn attempt(&self, message: &EmailMessage) -> Result<String, AttemptError> {
        let request = SendRequest {
            from: &self.config.from_address,
            to: &message.to,
            subject: &message.subject,
            text: &message.body,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AttemptError::Retryable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let body: SendResponse = response
                .json()
                .await
                .map_err(|e| AttemptError::Fatal(format!("Unexpected provider response: {}", e)))?;
            return Ok(body.id);
        }

        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            Err(AttemptError::Retryable(format!("Provider returned {}", status)))
        } else {
            Err(AttemptError::Fatal(format!("Provider rejected request: {}", status)))
        }
    }

    /// Send with retry logic
    async fn send_with_retry(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);

        loop {
            attempts += 1;

            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_email(&message.to)
            );

            match self.attempt(message).await {
                Ok(message_id) => {
                    info!(
                        "Email sent successfully to {} with id: {}",
                        mask_email(&message.to),
                        message_id
                    );
                    return Ok(message_id);
                }
                Err(AttemptError::Fatal(e)) => {
                    error!("Email provider rejected message: {}", e);
                    return Err(InfrastructureError::Email(e));
                }
                Err(AttemptError::Retryable(e)) => {
                    error!(
                        "Failed to send email (attempt {}/{}): {}",
                        attempts, self.config.max_retries, e
                    );

                    if attempts >= self.config.max_retries {
                        return Err(InfrastructureError::Email(format!(
                            "Failed to send email after {} attempts: {}",
                            self.config.max_retries, e
                        )));
                    }

                    warn!("Retrying email delivery after {:?}", delay);
                    tokio::time::sleep(delay).await;
                    delay *= 2; // Exponential backoff
                }
            }
        }
    }
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        self.send_with_retry(message).await
    }

    fn provider_name(&self) -> &str {
        "HTTP"
    }
}
