//! One-time code policy configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Longest code that still fits the generator's `u64` range
pub const MAX_CODE_LENGTH: usize = 18;

/// Issuance, expiry and uniqueness settings for contact-email codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Seconds after issuance during which a code can be verified
    #[serde(default = "default_expiry_seconds")]
    pub expiry_seconds: i64,

    /// Lifetime number of codes an organization may be issued
    #[serde(default = "default_max_issuances")]
    pub max_issuances: u32,

    /// Candidates tried before code generation gives up
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: u32,

    /// Stale record cleanup
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
            expiry_seconds: default_expiry_seconds(),
            max_issuances: default_max_issuances(),
            max_generation_attempts: default_max_generation_attempts(),
            cleanup: CleanupConfig::default(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            code_length: env_or("OTP_CODE_LENGTH", default_code_length()),
            expiry_seconds: env_or("OTP_EXPIRY_SECONDS", default_expiry_seconds()),
            max_issuances: env_or("OTP_MAX_ISSUANCES", default_max_issuances()),
            max_generation_attempts: env_or(
                "OTP_MAX_GENERATION_ATTEMPTS",
                default_max_generation_attempts(),
            ),
            cleanup: CleanupConfig::from_env(),
        }
    }

    /// Reject values the code generator or the service cannot honour
    pub fn validate(&self) -> Result<(), String> {
        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            return Err(format!(
                "OTP_CODE_LENGTH must be between 1 and {}",
                MAX_CODE_LENGTH
            ));
        }
        if self.expiry_seconds <= 0 {
            return Err("OTP_EXPIRY_SECONDS must be positive".to_string());
        }
        if self.max_issuances == 0 {
            return Err("OTP_MAX_ISSUANCES must be at least 1".to_string());
        }
        if self.max_generation_attempts == 0 {
            return Err("OTP_MAX_GENERATION_ATTEMPTS must be at least 1".to_string());
        }
        self.cleanup.validate()
    }
}

/// Periodic removal of outstanding records nobody will verify any more
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Whether the background task runs at all
    #[serde(default = "default_cleanup_enabled")]
    pub enabled: bool,

    /// Seconds between cleanup cycles
    #[serde(default = "default_cleanup_interval")]
    pub interval_seconds: u64,

    /// Records older than `expiry_seconds * retention_multiplier` are removed
    #[serde(default = "default_retention_multiplier")]
    pub retention_multiplier: i64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: default_cleanup_enabled(),
            interval_seconds: default_cleanup_interval(),
            retention_multiplier: default_retention_multiplier(),
        }
    }
}

impl CleanupConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            enabled: env_or("OTP_CLEANUP_ENABLED", default_cleanup_enabled()),
            interval_seconds: env_or("OTP_CLEANUP_INTERVAL_SECONDS", default_cleanup_interval()),
            retention_multiplier: env_or(
                "OTP_CLEANUP_RETENTION_MULTIPLIER",
                default_retention_multiplier(),
            ),
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.interval_seconds == 0 {
            return Err("OTP_CLEANUP_INTERVAL_SECONDS must be positive".to_string());
        }
        if self.retention_multiplier < 1 {
            return Err("OTP_CLEANUP_RETENTION_MULTIPLIER must be at least 1".to_string());
        }
        Ok(())
    }
}

fn default_code_length() -> usize {
    6
}

fn default_expiry_seconds() -> i64 {
    120 // 2 minutes
}

fn default_max_issuances() -> u32 {
    3
}

fn default_max_generation_attempts() -> u32 {
    5
}

fn default_cleanup_enabled() -> bool {
    true
}

fn default_cleanup_interval() -> u64 {
    3600 // hourly
}

fn default_retention_multiplier() -> i64 {
    10
}
