use actix_web::{web, HttpResponse};
use validator::Validate;

use ov_core::repositories::{OrganizationRepository, VerificationRecordRepository};
use ov_core::services::otp::EmailServiceTrait;
use ov_shared::types::ApiResponse;

use crate::dto::{ListOrganizationsQuery, OrganizationListResponse};
use crate::handlers::{domain_error_response, validation_error_response};

use super::AppState;

/// Handler for GET /api/v1/organizations
///
/// Organizations ordered by name. `limit` defaults to 20 and may be at
/// most 100; `offset` defaults to 0.
///
/// ## Errors
/// - 400 Bad Request: `limit` out of range
pub async fn list_organizations<V, O, E>(
    state: web::Data<AppState<V, O, E>>,
    query: web::Query<ListOrganizationsQuery>,
) -> HttpResponse
where
    V: VerificationRecordRepository + 'static,
    O: OrganizationRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let query = query.into_inner();
    if let Err(errors) = query.validate() {
        return validation_error_response(&errors);
    }

    let (limit, offset) = (query.limit(), query.offset());
    match state.organization_service.list_organizations(limit, offset).await {
        Ok(organizations) => HttpResponse::Ok().json(ApiResponse::success(
            OrganizationListResponse::new(&organizations, limit, offset),
        )),
        Err(error) => domain_error_response(error),
    }
}
