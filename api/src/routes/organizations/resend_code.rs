use actix_web::{web, HttpResponse};

use ov_core::domain::entities::organization::OrganizationId;
use ov_core::repositories::{OrganizationRepository, VerificationRecordRepository};
use ov_core::services::otp::EmailServiceTrait;
use ov_shared::types::ApiResponse;

use crate::dto::ResendCodeResponse;
use crate::handlers::otp_error_response;

use super::AppState;

/// Handler for POST /api/v1/organizations/{id}/otp
///
/// Supersedes any outstanding code with a new one and emails it.
///
/// ## Errors
/// - 404 Not Found: Unknown organization
/// - 429 Too Many Requests: Issuance cap reached
/// - 500 Internal Server Error: Storage or dispatch failure
pub async fn resend_code<V, O, E>(
    state: web::Data<AppState<V, O, E>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    V: VerificationRecordRepository + 'static,
    O: OrganizationRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let organization_id = OrganizationId(path.into_inner());

    match state.otp_service.resend_code(organization_id).await {
        Ok(result) => {
            let expiry_window = state.otp_service.config().expiry_window();
            HttpResponse::Ok().json(
                ApiResponse::success(ResendCodeResponse::new(&result, expiry_window))
                    .with_message("Verification code sent"),
            )
        }
        Err(error) => otp_error_response(error),
    }
}
