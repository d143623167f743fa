//! Organization route handlers
//!
//! This module contains the organization endpoints:
//! - Registration, which sends the first verification code
//! - Code verification and resend
//! - Verification status
//! - Directory reads by id, by domain name and as a paged list

pub mod by_domain;
pub mod create;
pub mod get;
pub mod list;
pub mod resend_code;
pub mod status;
pub mod verify_code;

use std::sync::Arc;

use actix_web::web;

use ov_core::repositories::{OrganizationRepository, VerificationRecordRepository};
use ov_core::services::organization::OrganizationService;
use ov_core::services::otp::{EmailServiceTrait, OtpService};

/// Application state that holds shared services
pub struct AppState<V, O, E>
where
    V: VerificationRecordRepository,
    O: OrganizationRepository,
    E: EmailServiceTrait,
{
    pub otp_service: Arc<OtpService<V, O, E>>,
    pub organization_service: Arc<OrganizationService<V, O, E>>,
}

/// Register the organization routes under the current scope
pub fn configure<V, O, E>(cfg: &mut web::ServiceConfig)
where
    V: VerificationRecordRepository + 'static,
    O: OrganizationRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    cfg.service(
        web::scope("/organizations")
            .route("", web::post().to(create::create_organization::<V, O, E>))
            .route("", web::get().to(list::list_organizations::<V, O, E>))
            .route(
                "/domain/{domain_name}",
                web::get().to(by_domain::get_organization_by_domain::<V, O, E>),
            )
            .route("/{id}", web::get().to(get::get_organization::<V, O, E>))
            .route("/otp/verify", web::post().to(verify_code::verify_code::<V, O, E>))
            .route("/{id}/otp", web::post().to(resend_code::resend_code::<V, O, E>))
            .route(
                "/{id}/verification",
                web::get().to(status::verification_status::<V, O, E>),
            ),
    );
}
