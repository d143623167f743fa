//! Conversion of service errors into HTTP responses
//!
//! Business-rule failures map to their own status codes. Internal
//! failures are logged by the service that hit them and reach the caller
//! only as a generic message.

use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use ov_core::errors::{DomainError, OtpError};
use ov_shared::errors::{error_codes, ErrorResponse};

const INTERNAL_MESSAGE: &str = "An internal error occurred";

fn respond(status: StatusCode, body: ErrorResponse) -> HttpResponse {
    HttpResponse::build(status).json(body)
}

fn internal_error() -> HttpResponse {
    respond(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_MESSAGE),
    )
}

/// Map an OTP workflow error to its HTTP response
pub fn otp_error_response(error: OtpError) -> HttpResponse {
    match error {
        OtpError::NotFound => respond(
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, "No matching verification code or organization"),
        ),
        OtpError::Expired => respond(
            StatusCode::GONE,
            ErrorResponse::new(error_codes::CODE_EXPIRED, "Verification code has expired; request a new one"),
        ),
        OtpError::AttemptExceeded => respond(
            StatusCode::TOO_MANY_REQUESTS,
            ErrorResponse::new(error_codes::ATTEMPT_EXCEEDED, "Maximum number of verification codes reached"),
        ),
        OtpError::AlreadyExists => respond(
            StatusCode::CONFLICT,
            ErrorResponse::new(error_codes::CONFLICT, "Verification code already exists"),
        ),
        OtpError::Internal { .. } => internal_error(),
    }
}

/// Map a domain error to its HTTP response
pub fn domain_error_response(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => respond(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message),
        ),
        DomainError::NotFound { resource } => respond(
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource)),
        ),
        DomainError::Conflict { message } => respond(
            StatusCode::CONFLICT,
            ErrorResponse::new(error_codes::CONFLICT, message),
        ),
        DomainError::Otp(otp) => otp_error_response(otp),
        DomainError::Internal { .. } => internal_error(),
    }
}

/// Build a 400 response listing the failed fields
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();

    respond(
        StatusCode::BAD_REQUEST,
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
            .add_detail("fields", fields),
    )
}
