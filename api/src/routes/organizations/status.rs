use actix_web::{web, HttpResponse};

use ov_core::domain::entities::organization::OrganizationId;
use ov_core::repositories::{OrganizationRepository, VerificationRecordRepository};
use ov_core::services::otp::EmailServiceTrait;
use ov_shared::types::ApiResponse;

use crate::dto::VerificationStatusResponse;
use crate::handlers::otp_error_response;

use super::AppState;

/// Handler for GET /api/v1/organizations/{id}/verification
pub async fn verification_status<V, O, E>(
    state: web::Data<AppState<V, O, E>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    V: VerificationRecordRepository + 'static,
    O: OrganizationRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let organization_id = path.into_inner();

    match state
        .otp_service
        .verification_status(OrganizationId(organization_id))
        .await
    {
        Ok(summary) => HttpResponse::Ok().json(ApiResponse::success(
            VerificationStatusResponse::new(organization_id, summary),
        )),
        Err(error) => otp_error_response(error),
    }
}
