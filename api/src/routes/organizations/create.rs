use actix_web::{web, HttpResponse};
use validator::Validate;

use ov_core::repositories::{OrganizationRepository, VerificationRecordRepository};
use ov_core::services::otp::EmailServiceTrait;
use ov_shared::types::ApiResponse;

use crate::dto::{CreateOrganizationRequest, CreateOrganizationResponse, OrganizationResponse};
use crate::handlers::{domain_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/organizations
///
/// Creates the organization and emails the first verification code to its
/// contact address.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Acme Ltd",
///     "contact_email": "ops@acme.example",
///     "domain_name": "acme.example"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// `verification_code_sent` is false when dispatch failed. The organization
/// still exists and a code can be requested from the resend endpoint.
///
/// ## Errors
/// - 400 Bad Request: Invalid name or contact email
/// - 409 Conflict: Contact email already registered
/// - 500 Internal Server Error: Storage failure
pub async fn create_organization<V, O, E>(
    state: web::Data<AppState<V, O, E>>,
    request: web::Json<CreateOrganizationRequest>,
) -> HttpResponse
where
    V: VerificationRecordRepository + 'static,
    O: OrganizationRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state.organization_service.register(request.into()).await {
        Ok(result) => {
            let body = CreateOrganizationResponse {
                organization: OrganizationResponse::from(&result.organization),
                verification_code_sent: result.code_dispatched,
            };
            let message = if result.code_dispatched {
                "Organization created; verification code sent"
            } else {
                "Organization created; verification code could not be sent"
            };
            HttpResponse::Created().json(ApiResponse::success(body).with_message(message))
        }
        Err(error) => domain_error_response(error),
    }
}
