//! Types for OTP service results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::verification_record::VerificationRecord;

/// Result of issuing and dispatching a code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The verification record that was created
    pub record: VerificationRecord,
    /// The email message ID from the provider
    pub message_id: String,
    /// Codes issued to the organization so far, this one included
    pub issuance_count: u32,
    /// Codes that may still be issued
    pub remaining_issuances: u32,
}

/// Position of an organization in the verification state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// No outstanding code and issuance still allowed
    Unverified,
    /// An outstanding code exists, expired or not
    PendingVerification,
    /// Contact email proven; terminal
    Verified,
    /// Issuance cap reached; an outstanding code may still verify
    Locked,
}

/// Read-only view of an organization's verification progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub status: VerificationStatus,
    pub issuance_count: u32,
    pub remaining_issuances: u32,
    /// When the outstanding code stops verifying, if there is one
    pub code_expires_at: Option<DateTime<Utc>>,
}
