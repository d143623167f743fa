use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use ov_core::domain::entities::organization::{NewOrganization, Organization};
use ov_core::services::otp::{SendCodeResult, VerificationStatus, VerificationSummary};
use ov_shared::config::otp::MAX_CODE_LENGTH;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrganizationRequest {
    /// Display name, 1 to 255 characters
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    /// Address that receives the verification code
    #[validate(email, length(max = 254))]
    pub contact_email: String,

    /// Optional public domain, e.g. "example.org"
    #[validate(length(min = 1, max = 255))]
    pub domain_name: Option<String>,
}

impl From<CreateOrganizationRequest> for NewOrganization {
    fn from(request: CreateOrganizationRequest) -> Self {
        let organization = NewOrganization::new(request.name, request.contact_email);
        match request.domain_name {
            Some(domain) => organization.with_domain_name(domain),
            None => organization,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(range(min = 1))]
    pub organization_id: i64,

    /// The numeric code from the verification email
    #[validate(custom = "validate_numeric_code")]
    pub code: String,
}

fn validate_numeric_code(code: &str) -> Result<(), ValidationError> {
    if code.is_empty() || code.len() > MAX_CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new("numeric_code"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationResponse {
    pub id: i64,
    pub name: String,
    pub contact_email: String,
    pub domain_name: Option<String>,
    pub is_email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Organization> for OrganizationResponse {
    fn from(organization: &Organization) -> Self {
        Self {
            id: organization.id.value(),
            name: organization.name.clone(),
            contact_email: organization.contact_email.clone(),
            domain_name: organization.domain_name.clone(),
            is_email_verified: organization.is_email_verified,
            created_at: organization.created_at,
        }
    }
}

/// Query string of the organization listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListOrganizationsQuery {
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,

    pub offset: Option<u32>,
}

impl ListOrganizationsQuery {
    pub const DEFAULT_LIMIT: u32 = 20;

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }

    pub fn offset(&self) -> u32 {
        self.offset.unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationListResponse {
    pub organizations: Vec<OrganizationResponse>,
    pub limit: u32,
    pub offset: u32,
}

impl OrganizationListResponse {
    pub fn new(organizations: &[Organization], limit: u32, offset: u32) -> Self {
        Self {
            organizations: organizations.iter().map(OrganizationResponse::from).collect(),
            limit,
            offset,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationResponse {
    pub organization: OrganizationResponse,
    /// False when the first code could not be sent; request a resend
    pub verification_code_sent: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub organization_id: i64,
    pub is_email_verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResendCodeResponse {
    pub organization_id: i64,
    pub expires_at: DateTime<Utc>,
    pub issuance_count: u32,
    pub remaining_issuances: u32,
}

impl ResendCodeResponse {
    pub fn new(result: &SendCodeResult, expiry_window: Duration) -> Self {
        Self {
            organization_id: result.record.organization_id.value(),
            expires_at: result.record.expires_at(expiry_window),
            issuance_count: result.issuance_count,
            remaining_issuances: result.remaining_issuances,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationStatusResponse {
    pub organization_id: i64,
    pub status: VerificationStatus,
    pub issuance_count: u32,
    pub remaining_issuances: u32,
    pub code_expires_at: Option<DateTime<Utc>>,
}

impl VerificationStatusResponse {
    pub fn new(organization_id: i64, summary: VerificationSummary) -> Self {
        Self {
            organization_id,
            status: summary.status,
            issuance_count: summary.issuance_count,
            remaining_issuances: summary.remaining_issuances,
            code_expires_at: summary.code_expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let valid = CreateOrganizationRequest {
            name: "Acme".to_string(),
            contact_email: "ops@acme.example".to_string(),
            domain_name: Some("acme.example".to_string()),
        };
        assert!(valid.validate().is_ok());

        let bad_email = CreateOrganizationRequest {
            contact_email: "not-an-email".to_string(),
            ..valid.clone()
        };
        assert!(bad_email.validate().is_err());

        let empty_name = CreateOrganizationRequest {
            name: String::new(),
            ..valid
        };
        assert!(empty_name.validate().is_err());
    }

    #[test]
    fn test_verify_request_requires_digits() {
        let valid = VerifyCodeRequest {
            organization_id: 1,
            code: "012345".to_string(),
        };
        assert!(valid.validate().is_ok());

        for code in ["", "12a456", "1234567890123456789"] {
            let request = VerifyCodeRequest {
                organization_id: 1,
                code: code.to_string(),
            };
            assert!(request.validate().is_err(), "code {:?} should be rejected", code);
        }

        let bad_id = VerifyCodeRequest {
            organization_id: 0,
            code: "123456".to_string(),
        };
        assert!(bad_id.validate().is_err());
    }

    #[test]
    fn test_list_query_defaults_and_bounds() {
        let empty = ListOrganizationsQuery {
            limit: None,
            offset: None,
        };
        assert!(empty.validate().is_ok());
        assert_eq!(empty.limit(), ListOrganizationsQuery::DEFAULT_LIMIT);
        assert_eq!(empty.offset(), 0);

        for limit in [0, 101] {
            let query = ListOrganizationsQuery {
                limit: Some(limit),
                offset: None,
            };
            assert!(query.validate().is_err(), "limit {} should be rejected", limit);
        }
    }

    #[test]
    fn test_request_converts_to_new_organization() {
        let request = CreateOrganizationRequest {
            name: "Acme".to_string(),
            contact_email: "ops@acme.example".to_string(),
            domain_name: None,
        };
        let organization: NewOrganization = request.into();
        assert_eq!(organization.name, "Acme");
        assert!(organization.domain_name.is_none());
    }
}
