//! Configuration for the OTP service

use chrono::Duration;
use ov_shared::config::OtpConfig;

use crate::domain::entities::verification_record::{
    DEFAULT_CODE_LENGTH, DEFAULT_EXPIRY_SECONDS, DEFAULT_MAX_ISSUANCES,
};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of digits in a code
    pub code_length: usize,
    /// Seconds during which a code verifies after issuance
    pub expiry_seconds: i64,
    /// Lifetime number of codes an organization may be issued
    pub max_issuances: u32,
    /// Candidates tried before generation gives up
    pub max_generation_attempts: u32,
}

impl OtpServiceConfig {
    pub fn expiry_window(&self) -> Duration {
        Duration::seconds(self.expiry_seconds)
    }
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            expiry_seconds: DEFAULT_EXPIRY_SECONDS,
            max_issuances: DEFAULT_MAX_ISSUANCES,
            max_generation_attempts: 5,
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_length: config.code_length,
            expiry_seconds: config.expiry_seconds,
            max_issuances: config.max_issuances,
            max_generation_attempts: config.max_generation_attempts,
        }
    }
}
