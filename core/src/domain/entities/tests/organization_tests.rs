//! Unit tests for organization entity

use chrono::Utc;

use crate::domain::entities::organization::{NewOrganization, Organization, OrganizationId};

#[test]
fn test_normalized_trims_and_lowercases() {
    let fields = NewOrganization::new("  Acme Corp ", " Admin@ACME.com ")
        .with_domain_name("ACME.com")
        .normalized();

    assert_eq!(fields.name, "Acme Corp");
    assert_eq!(fields.contact_email, "admin@acme.com");
    assert_eq!(fields.domain_name.as_deref(), Some("acme.com"));
}

#[test]
fn test_blank_domain_is_dropped() {
    let fields = NewOrganization::new("Acme", "admin@acme.com")
        .with_domain_name("   ")
        .normalized();

    assert!(fields.domain_name.is_none());
}

#[test]
fn test_new_organization_starts_unverified() {
    let org = Organization::new(
        OrganizationId(1),
        NewOrganization::new("Acme", "admin@acme.com"),
        Utc::now(),
    );

    let state = org.verification_state();
    assert_eq!(state.organization_id, OrganizationId(1));
    assert!(!state.is_email_verified);
}

#[test]
fn test_organization_id_serializes_as_number() {
    let json = serde_json::to_string(&OrganizationId(42)).unwrap();
    assert_eq!(json, "42");
}
