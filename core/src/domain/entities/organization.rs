//! Organization entity as seen by the verification workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory identifier of an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub i64);

impl OrganizationId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for OrganizationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Organization entity owned by the organization directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Directory-assigned identifier
    pub id: OrganizationId,

    /// Display name
    pub name: String,

    /// Address codes are delivered to; unique across organizations
    pub contact_email: String,

    /// Primary web domain, if known
    pub domain_name: Option<String>,

    /// Whether the contact email has been proven reachable
    pub is_email_verified: bool,

    /// Timestamp when the organization was created
    pub created_at: DateTime<Utc>,
}

impl Organization {
    /// Creates an unverified organization from creation fields
    pub fn new(id: OrganizationId, fields: NewOrganization, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            contact_email: fields.contact_email,
            domain_name: fields.domain_name,
            is_email_verified: false,
            created_at,
        }
    }

    /// Projection consumed by the verification workflow
    pub fn verification_state(&self) -> OrganizationVerificationState {
        OrganizationVerificationState {
            organization_id: self.id,
            is_email_verified: self.is_email_verified,
        }
    }
}

/// Fields required to create an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganization {
    pub name: String,
    pub contact_email: String,
    pub domain_name: Option<String>,
}

impl NewOrganization {
    pub fn new(name: impl Into<String>, contact_email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_email: contact_email.into(),
            domain_name: None,
        }
    }

    pub fn with_domain_name(mut self, domain_name: impl Into<String>) -> Self {
        self.domain_name = Some(domain_name.into());
        self
    }

    /// Trims whitespace and lowercases the email and domain
    ///
    /// Contact emails are compared case-insensitively by the directory, so
    /// they are stored in their lowercase form.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            contact_email: self.contact_email.trim().to_lowercase(),
            domain_name: self
                .domain_name
                .map(|d| d.trim().to_lowercase())
                .filter(|d| !d.is_empty()),
        }
    }
}

/// Verification flag of an organization
///
/// `is_email_verified` only ever moves from `false` to `true` through this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationVerificationState {
    pub organization_id: OrganizationId,
    pub is_email_verified: bool,
}
