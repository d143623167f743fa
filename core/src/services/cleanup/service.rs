//! Cleanup service for outstanding records nobody will verify any more
//!
//! Verification only expires records lazily, so superseded or abandoned
//! codes would otherwise stay in the store forever. The issuance history is
//! never touched, which keeps the lifetime cap intact.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{error, info, warn};

use ov_shared::config::OtpConfig;

use crate::errors::DomainError;
use crate::repositories::VerificationRecordRepository;
use crate::services::otp::{Clock, SystemClock};

/// Configuration for verification record cleanup
#[derive(Debug, Clone)]
pub struct VerificationCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Records older than this are deleted
    pub retention: Duration,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for VerificationCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,              // Run every hour
            retention: Duration::seconds(1200), // 10 expiry windows
            enabled: true,
        }
    }
}

impl From<&OtpConfig> for VerificationCleanupConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            interval_seconds: config.cleanup.interval_seconds,
            retention: Duration::seconds(
                config
                    .expiry_seconds
                    .saturating_mul(config.cleanup.retention_multiplier),
            ),
            enabled: config.cleanup.enabled,
        }
    }
}

/// Service deleting outstanding records past the retention period
pub struct VerificationCleanupService<R: VerificationRecordRepository + 'static> {
    repository: Arc<R>,
    config: VerificationCleanupConfig,
    clock: Arc<dyn Clock>,
}

impl<R: VerificationRecordRepository> VerificationCleanupService<R> {
    /// Create a new cleanup service using the system clock
    pub fn new(repository: Arc<R>, config: VerificationCleanupConfig) -> Self {
        Self {
            repository,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock; share the OTP service's clock so both agree on record age
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Run a single cleanup cycle relative to `now`
    pub async fn run_cleanup_at(&self, now: DateTime<Utc>) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let cutoff = now - self.config.retention;
        let deleted = self.repository.delete_issued_before(cutoff).await?;

        info!(
            deleted = deleted,
            cutoff = %cutoff,
            event = "otp_cleanup_completed",
            "Deleted {} stale verification records",
            deleted
        );

        Ok(CleanupResult {
            stale_records_deleted: deleted,
            cutoff: Some(cutoff),
        })
    }

    /// Run a single cleanup cycle
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        self.run_cleanup_at(self.clock.now()).await
    }

    /// Start the cleanup service as a background task
    ///
    /// This spawns a tokio task that runs cleanup at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Verification record cleanup is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Verification record cleanup started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!(error = %e, event = "otp_cleanup_failed", "Verification record cleanup failed");
                }
            }
        });
    }
}

/// Result of a cleanup operation
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Number of outstanding records deleted
    pub stale_records_deleted: u64,
    /// Issuance time before which records were deleted
    pub cutoff: Option<DateTime<Utc>>,
}
