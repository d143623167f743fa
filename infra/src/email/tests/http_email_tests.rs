//! Tests for the HTTP email service

use std::time::Instant;

use crate::email::{verification_message, EmailService, HttpEmailConfig, HttpEmailService};
use crate::InfrastructureError;

fn config(api_url: &str) -> HttpEmailConfig {
    HttpEmailConfig {
        api_url: api_url.to_string(),
        api_key: "test-key".to_string(),
        from_address: "no-reply@orgverify.local".to_string(),
        max_retries: 3,
        retry_delay_ms: 10,
        request_timeout_secs: 2,
    }
}

#[test]
fn test_missing_credentials_rejected() {
    let mut cfg = config("https://mail.example.com/v1/send");
    cfg.api_key.clear();

    let result = HttpEmailService::new(cfg);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[tokio::test]
async fn test_unreachable_provider_exhausts_retries() {
    // Nothing listens on port 1 of the loopback interface
    let service = HttpEmailService::new(config("http://127.0.0.1:1/send")).unwrap();
    let message = verification_message("admin@acme.com", "123456", 120);

    let started = Instant::now();
    let result = service.send_email(&message).await;

    match result {
        Err(InfrastructureError::Email(e)) => assert!(e.contains("after 3 attempts")),
        other => panic!("expected email error, got {:?}", other.map(|_| ())),
    }
    // Two backoff sleeps: 10ms then 20ms
    assert!(started.elapsed().as_millis() >= 30);
    assert_eq!(service.provider_name(), "HTTP");
}
