//! Unit tests for verification record entity

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::organization::OrganizationId;
use crate::domain::entities::verification_record::{VerificationRecord, DEFAULT_EXPIRY_SECONDS};

fn record_issued_at_noon() -> VerificationRecord {
    let issued_at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    VerificationRecord::new(OrganizationId(7), "482913", issued_at)
}

#[test]
fn test_age_is_measured_from_issuance() {
    let record = record_issued_at_noon();
    let now = record.issued_at + Duration::seconds(45);

    assert_eq!(record.age_at(now), Duration::seconds(45));
}

#[test]
fn test_not_expired_inside_window() {
    let record = record_issued_at_noon();
    let window = Duration::seconds(DEFAULT_EXPIRY_SECONDS);
    let now = record.issued_at + Duration::seconds(DEFAULT_EXPIRY_SECONDS - 1);

    assert!(!record.is_expired_at(now, window));
}

#[test]
fn test_expired_exactly_at_window() {
    let record = record_issued_at_noon();
    let window = Duration::seconds(DEFAULT_EXPIRY_SECONDS);
    let now = record.issued_at + window;

    assert!(record.is_expired_at(now, window));
}

#[test]
fn test_expired_after_window() {
    let record = record_issued_at_noon();
    let window = Duration::seconds(DEFAULT_EXPIRY_SECONDS);
    let now = record.issued_at + Duration::minutes(3);

    assert!(record.is_expired_at(now, window));
    assert_eq!(record.expires_at(window), record.issued_at + Duration::minutes(2));
}
