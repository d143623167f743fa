use actix_web::{web, HttpResponse};

use ov_core::domain::entities::organization::OrganizationId;
use ov_core::repositories::{OrganizationRepository, VerificationRecordRepository};
use ov_core::services::otp::EmailServiceTrait;
use ov_shared::types::ApiResponse;

use crate::dto::OrganizationResponse;
use crate::handlers::domain_error_response;

use super::AppState;

/// Handler for GET /api/v1/organizations/{id}
///
/// ## Errors
/// - 404 Not Found: Unknown organization
pub async fn get_organization<V, O, E>(
    state: web::Data<AppState<V, O, E>>,
    path: web::Path<i64>,
) -> HttpResponse
where
    V: VerificationRecordRepository + 'static,
    O: OrganizationRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let organization_id = OrganizationId(path.into_inner());

    match state.organization_service.get_organization(organization_id).await {
        Ok(organization) => {
            HttpResponse::Ok().json(ApiResponse::success(OrganizationResponse::from(&organization)))
        }
        Err(error) => domain_error_response(error),
    }
}
