use actix_web::{web, HttpResponse};

use ov_core::repositories::{OrganizationRepository, VerificationRecordRepository};
use ov_core::services::otp::EmailServiceTrait;
use ov_shared::types::ApiResponse;

use crate::dto::OrganizationResponse;
use crate::handlers::domain_error_response;

use super::AppState;

/// Handler for GET /api/v1/organizations/domain/{domain_name}
///
/// Several organizations may share a domain; the first one registered is
/// returned. Matching ignores case.
///
/// ## Errors
/// - 404 Not Found: No organization registered under the domain
pub async fn get_organization_by_domain<V, O, E>(
    state: web::Data<AppState<V, O, E>>,
    path: web::Path<String>,
) -> HttpResponse
where
    V: VerificationRecordRepository + 'static,
    O: OrganizationRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let domain_name = path.into_inner();

    match state.organization_service.find_by_domain_name(&domain_name).await {
        Ok(organization) => {
            HttpResponse::Ok().json(ApiResponse::success(OrganizationResponse::from(&organization)))
        }
        Err(error) => domain_error_response(error),
    }
}
