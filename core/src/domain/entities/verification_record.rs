//! Verification record entity for contact-email one-time codes.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::organization::OrganizationId;

/// Default number of digits in a code
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default time a code stays verifiable (2 minutes)
pub const DEFAULT_EXPIRY_SECONDS: i64 = 120;

/// Default lifetime number of codes an organization may be issued
pub const DEFAULT_MAX_ISSUANCES: u32 = 3;

/// An outstanding one-time code bound to an organization
///
/// Records are never modified after creation. They are either read or
/// deleted, and a new issuance replaces the previous record wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Organization the code was issued to
    pub organization_id: OrganizationId,

    /// Fixed-length numeric code, unique among outstanding records
    pub code: String,

    /// Issuance timestamp (UTC)
    pub issued_at: DateTime<Utc>,
}

impl VerificationRecord {
    pub fn new(organization_id: OrganizationId, code: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            organization_id,
            code: code.into(),
            issued_at,
        }
    }

    /// Time elapsed since issuance
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        now - self.issued_at
    }

    /// A code is expired once its age reaches the window
    pub fn is_expired_at(&self, now: DateTime<Utc>, expiry_window: Duration) -> bool {
        self.age_at(now) >= expiry_window
    }

    /// Instant from which the code no longer verifies
    pub fn expires_at(&self, expiry_window: Duration) -> DateTime<Utc> {
        self.issued_at + expiry_window
    }
}
