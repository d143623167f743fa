//! Unit tests for code generation

use chrono::Utc;
use std::sync::Arc;

use super::mocks::ScriptedRandomSource;
use crate::domain::entities::organization::OrganizationId;
use crate::domain::entities::verification_record::VerificationRecord;
use crate::errors::OtpError;
use crate::repositories::{InMemoryVerificationRecordRepository, VerificationRecordRepository};
use crate::services::otp::{CodeGenerator, OsRandomSource, SeededRandomSource};

#[test]
fn test_candidate_is_zero_padded() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    let generator = CodeGenerator::new(repo, Arc::new(ScriptedRandomSource::new(&[42])), 6, 5);

    assert_eq!(generator.candidate(), "000042");
}

#[test]
fn test_candidate_has_requested_length() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    for length in [1usize, 4, 6, 8, 18] {
        let generator = CodeGenerator::new(repo.clone(), Arc::new(OsRandomSource), length, 5);
        for _ in 0..50 {
            let code = generator.candidate();
            assert_eq!(code.len(), length);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}

#[test]
fn test_out_of_range_length_is_clamped() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());

    let too_long = CodeGenerator::new(repo.clone(), Arc::new(OsRandomSource), 25, 5);
    assert_eq!(too_long.code_length(), 18);
    assert_eq!(too_long.candidate().len(), 18);

    let zero = CodeGenerator::new(repo, Arc::new(OsRandomSource), 0, 5);
    assert_eq!(zero.candidate().len(), 1);
}

#[test]
fn test_seeded_source_is_reproducible() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    let first = CodeGenerator::new(repo.clone(), Arc::new(SeededRandomSource::new(7)), 6, 5);
    let second = CodeGenerator::new(repo, Arc::new(SeededRandomSource::new(7)), 6, 5);

    let a: Vec<String> = (0..10).map(|_| first.candidate()).collect();
    let b: Vec<String> = (0..10).map(|_| second.candidate()).collect();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_generate_skips_outstanding_codes() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    repo.create(VerificationRecord::new(OrganizationId(1), "111111", Utc::now()))
        .await
        .unwrap();

    let random = Arc::new(ScriptedRandomSource::new(&[111111, 222222]));
    let generator = CodeGenerator::new(repo, random, 6, 5);

    assert_eq!(generator.generate().await.unwrap(), "222222");
}

#[tokio::test]
async fn test_generate_gives_up_after_bounded_attempts() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    repo.create(VerificationRecord::new(OrganizationId(1), "333333", Utc::now()))
        .await
        .unwrap();

    let random = Arc::new(ScriptedRandomSource::new(&[333333]));
    let generator = CodeGenerator::new(repo, random, 6, 3);

    let result = generator.generate().await;
    assert!(matches!(result, Err(OtpError::Internal { .. })));
}

#[tokio::test]
async fn test_generate_propagates_store_failure() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    repo.set_should_fail(true);
    let generator = CodeGenerator::new(repo, Arc::new(OsRandomSource), 6, 5);

    assert!(generator.generate().await.unwrap_err().is_internal());
}
