//! Unique numeric code generation

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::{Arc, Mutex};

use ov_shared::config::otp::MAX_CODE_LENGTH;

use crate::errors::{OtpError, OtpResult};
use crate::repositories::VerificationRecordRepository;

/// Source of uniformly distributed integers
pub trait RandomSource: Send + Sync + fmt::Debug {
    /// Returns a value in `0..upper`
    fn next_below(&self, upper: u64) -> u64;
}

/// Operating system CSPRNG, used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
    fn next_below(&self, upper: u64) -> u64 {
        OsRng.gen_range(0..upper)
    }
}

/// Deterministic source for reproducible runs
#[derive(Debug)]
pub struct SeededRandomSource {
    rng: Mutex<StdRng>,
}

impl SeededRandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandomSource {
    fn next_below(&self, upper: u64) -> u64 {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..upper),
            Err(poisoned) => poisoned.into_inner().gen_range(0..upper),
        }
    }
}

/// Generates fixed-length numeric codes not held by any outstanding record
pub struct CodeGenerator<V: VerificationRecordRepository> {
    repository: Arc<V>,
    random: Arc<dyn RandomSource>,
    code_length: usize,
    max_attempts: u32,
}

impl<V: VerificationRecordRepository> CodeGenerator<V> {
    /// Create a generator
    ///
    /// `code_length` is clamped to `1..=MAX_CODE_LENGTH` so that
    /// `10^code_length` fits in a `u64`.
    pub fn new(
        repository: Arc<V>,
        random: Arc<dyn RandomSource>,
        code_length: usize,
        max_attempts: u32,
    ) -> Self {
        let clamped = code_length.clamp(1, MAX_CODE_LENGTH);
        if clamped != code_length {
            tracing::warn!(
                requested = code_length,
                used = clamped,
                event = "otp_code_length_clamped",
                "Code length out of range"
            );
        }

        Self {
            repository,
            random,
            code_length: clamped,
            max_attempts,
        }
    }

    /// Number of digits in generated codes
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Produce one zero-padded candidate without checking uniqueness
    pub fn candidate(&self) -> String {
        let upper = 10u64.pow(self.code_length as u32);
        let value = self.random.next_below(upper);
        format!("{:0width$}", value, width = self.code_length)
    }

    /// Produce a code that no outstanding record currently holds
    ///
    /// # Returns
    /// * `Ok(String)` - A fresh code
    /// * `Err(OtpError::Internal)` - Every attempt collided, or the store failed
    pub async fn generate(&self) -> OtpResult<String> {
        for attempt in 1..=self.max_attempts {
            let code = self.candidate();

            if !self.repository.code_exists(&code).await.map_err(OtpError::from)? {
                return Ok(code);
            }

            tracing::debug!(
                attempt = attempt,
                event = "otp_code_collision",
                "Generated code collides with an outstanding record"
            );
        }

        Err(OtpError::internal(format!(
            "Could not generate a unique code after {} attempts",
            self.max_attempts
        )))
    }
}
