//! Configuration module with business-specific sub-modules
//!
//! - `database` - Database connection and pool configuration
//! - `email` - Email delivery provider configuration
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time code issuance, expiry and cleanup policy
//! - `server` - HTTP server configuration

pub mod database;
pub mod email;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{CleanupConfig, OtpConfig};
pub use server::ServerConfig;

/// Parse `key` from the environment, falling back to `default` when unset
/// or unparsable
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Which persistence backend the binary wires into the services
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// MySQL through sqlx
    Mysql,
    /// In-process maps, for local development only
    Memory,
}

impl StorageBackend {
    /// Read `STORAGE_BACKEND`, defaulting to MySQL
    pub fn from_env() -> Self {
        match std::env::var("STORAGE_BACKEND")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "memory" | "mem" | "in-memory" => StorageBackend::Memory,
            _ => StorageBackend::Mysql,
        }
    }
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::Mysql
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Persistence backend selection
    #[serde(default)]
    pub storage: StorageBackend,

    /// One-time code policy
    #[serde(default)]
    pub otp: OtpConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            storage: StorageBackend::default(),
            otp: OtpConfig::default(),
            email: EmailConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Every section falls back to its defaults when a variable is absent.
    pub fn from_env() -> Self {
        let environment = Environment::from_env();

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            storage: StorageBackend::from_env(),
            otp: OtpConfig::from_env(),
            email: EmailConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Check every section for values the services cannot run with
    pub fn validate(&self) -> Result<(), String> {
        self.otp.validate()?;
        self.email.validate()?;
        if self.server.port == 0 {
            return Err("SERVER_PORT must be greater than zero".to_string());
        }
        Ok(())
    }
}
