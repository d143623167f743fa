//! Unit tests for the in-memory organization directory

use crate::domain::entities::organization::{NewOrganization, OrganizationId};
use crate::errors::DomainError;
use crate::repositories::organization::{InMemoryOrganizationRepository, OrganizationRepository};

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let repo = InMemoryOrganizationRepository::new();

    let first = repo.create(NewOrganization::new("Acme", "admin@acme.com")).await.unwrap();
    let second = repo.create(NewOrganization::new("Globex", "ops@globex.com")).await.unwrap();

    assert_eq!(first.id, OrganizationId(1));
    assert_eq!(second.id, OrganizationId(2));
    assert!(!first.is_email_verified);
    assert!(repo.exists(first.id).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_contact_email_conflicts() {
    let repo = InMemoryOrganizationRepository::new();
    repo.create(NewOrganization::new("Acme", "admin@acme.com")).await.unwrap();

    let result = repo.create(NewOrganization::new("Acme Again", "ADMIN@acme.com")).await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_set_email_verified_is_idempotent() {
    let repo = InMemoryOrganizationRepository::new();
    let org = repo.create(NewOrganization::new("Acme", "admin@acme.com")).await.unwrap();

    repo.set_email_verified(org.id).await.unwrap();
    repo.set_email_verified(org.id).await.unwrap();

    let stored = repo.find_by_id(org.id).await.unwrap().unwrap();
    assert!(stored.is_email_verified);
}

#[tokio::test]
async fn test_missing_organization() {
    let repo = InMemoryOrganizationRepository::new();
    let missing = OrganizationId(404);

    assert!(!repo.exists(missing).await.unwrap());
    assert!(repo.find_by_id(missing).await.unwrap().is_none());
    assert!(matches!(
        repo.get_contact_email(missing).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        repo.set_email_verified(missing).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_find_by_domain_name_returns_first_registered() {
    let repo = InMemoryOrganizationRepository::new();
    let first = repo
        .create(NewOrganization::new("Acme", "admin@acme.com").with_domain_name("acme.com"))
        .await
        .unwrap();
    repo.create(NewOrganization::new("Acme EU", "eu@acme.com").with_domain_name("acme.com"))
        .await
        .unwrap();
    repo.create(NewOrganization::new("Globex", "ops@globex.com")).await.unwrap();

    let found = repo.find_by_domain_name("acme.com").await.unwrap().unwrap();

    assert_eq!(found.id, first.id);
    assert!(repo.find_by_domain_name("globex.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_orders_by_name_and_pages() {
    let repo = InMemoryOrganizationRepository::new();
    for (name, email) in [
        ("Initech", "it@initech.com"),
        ("Acme", "admin@acme.com"),
        ("Globex", "ops@globex.com"),
    ] {
        repo.create(NewOrganization::new(name, email)).await.unwrap();
    }

    let names = |page: Vec<crate::domain::entities::organization::Organization>| {
        page.into_iter().map(|o| o.name).collect::<Vec<_>>()
    };

    assert_eq!(names(repo.list(10, 0).await.unwrap()), ["Acme", "Globex", "Initech"]);
    assert_eq!(names(repo.list(2, 1).await.unwrap()), ["Globex", "Initech"]);
    assert!(repo.list(10, 3).await.unwrap().is_empty());
}
