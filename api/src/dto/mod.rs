//! Request and response payloads for the HTTP surface.

pub mod organization;

pub use organization::{
    CreateOrganizationRequest, CreateOrganizationResponse, ListOrganizationsQuery,
    OrganizationListResponse, OrganizationResponse, ResendCodeResponse,
    VerificationStatusResponse, VerifyCodeRequest, VerifyCodeResponse,
};
