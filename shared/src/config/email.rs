//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// Settings for the notification dispatcher that delivers codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// Provider name ("http" or "mock")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Send endpoint of the HTTP email provider
    #[serde(default)]
    pub api_url: String,

    /// Bearer token for the HTTP email provider
    #[serde(default)]
    pub api_key: String,

    /// Sender address
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Maximum delivery attempts per message
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry, doubled after every failure
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Timeout for a single provider request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: String::new(),
            api_key: String::new(),
            from_address: default_from_address(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("EMAIL_PROVIDER").unwrap_or(defaults.provider),
            api_url: std::env::var("EMAIL_API_URL").unwrap_or_default(),
            api_key: std::env::var("EMAIL_API_KEY").unwrap_or_default(),
            from_address: std::env::var("EMAIL_FROM_ADDRESS").unwrap_or(defaults.from_address),
            max_retries: std::env::var("EMAIL_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_retries),
            retry_delay_ms: std::env::var("EMAIL_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.retry_delay_ms),
            request_timeout_secs: std::env::var("EMAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Whether messages are only logged instead of delivered
    pub fn is_mock(&self) -> bool {
        self.provider == "mock"
    }

    /// The HTTP provider needs an endpoint and a key
    pub fn validate(&self) -> Result<(), String> {
        match self.provider.as_str() {
            "mock" => Ok(()),
            "http" => {
                if self.api_url.is_empty() {
                    return Err("EMAIL_API_URL is required for the http provider".to_string());
                }
                if self.api_key.is_empty() {
                    return Err("EMAIL_API_KEY is required for the http provider".to_string());
                }
                if self.max_retries == 0 {
                    return Err("EMAIL_MAX_RETRIES must be at least 1".to_string());
                }
                Ok(())
            }
            other => Err(format!("Unknown EMAIL_PROVIDER '{}'", other)),
        }
    }
}

fn default_provider() -> String {
    String::from("mock")
}

fn default_from_address() -> String {
    String::from("no-reply@orgverify.local")
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mock() {
        let config = EmailConfig::default();
        assert!(config.is_mock());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_http_requires_credentials() {
        let mut config = EmailConfig {
            provider: "http".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.api_url = "https://mail.example.com/v1/send".to_string();
        assert!(config.validate().is_err());

        config.api_key = "secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_provider() {
        let config = EmailConfig {
            provider: "carrier-pigeon".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("carrier-pigeon"));
    }
}
