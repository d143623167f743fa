//! Application factory
//!
//! Builds the actix-web application around already-wired services so the
//! binary and the route tests share one routing table.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{middleware::Logger, web, App, HttpResponse};

use ov_core::repositories::{OrganizationRepository, VerificationRecordRepository};
use ov_core::services::otp::EmailServiceTrait;
use ov_shared::errors::{error_codes, ErrorResponse};
use ov_shared::types::HealthResponse;

use crate::middleware::create_cors;
use crate::routes::organizations::{self, AppState};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "orgverify-api";

/// Create and configure the application with all dependencies
pub fn create_app<V, O, E>(
    app_state: web::Data<AppState<V, O, E>>,
    allowed_origins: &[String],
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    V: VerificationRecordRepository + 'static,
    O: OrganizationRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            let response = HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::BAD_REQUEST,
                message,
            ));
            actix_web::error::InternalError::from_response(err, response).into()
        }))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            let response = HttpResponse::BadRequest().json(ErrorResponse::new(
                error_codes::BAD_REQUEST,
                err.to_string(),
            ));
            actix_web::error::InternalError::from_response(err, response).into()
        }))
        // Middleware runs outermost-last: CORS sees the request before logging
        .wrap(Logger::default())
        .wrap(create_cors(allowed_origins))
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").configure(organizations::configure::<V, O, E>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION")))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
