use actix_web::{web, HttpResponse};
use validator::Validate;

use ov_core::domain::entities::organization::OrganizationId;
use ov_core::repositories::{OrganizationRepository, VerificationRecordRepository};
use ov_core::services::otp::EmailServiceTrait;
use ov_shared::types::ApiResponse;

use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::{otp_error_response, validation_error_response};

use super::AppState;

/// Handler for POST /api/v1/organizations/otp/verify
///
/// # Request Body
///
/// ```json
/// {
///     "organization_id": 42,
///     "code": "123456"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed code
/// - 404 Not Found: Wrong code, no outstanding code, or already consumed
/// - 410 Gone: Code expired
/// - 500 Internal Server Error: Storage failure
pub async fn verify_code<V, O, E>(
    state: web::Data<AppState<V, O, E>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse
where
    V: VerificationRecordRepository + 'static,
    O: OrganizationRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let organization_id = OrganizationId(request.organization_id);
    match state.otp_service.verify_code(organization_id, &request.code).await {
        Ok(()) => HttpResponse::Ok().json(
            ApiResponse::success(VerifyCodeResponse {
                organization_id: organization_id.value(),
                is_email_verified: true,
            })
            .with_message("Contact email verified"),
        ),
        Err(error) => otp_error_response(error),
    }
}
