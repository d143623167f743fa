//! CORS middleware configuration for cross-origin requests.
//!
//! An empty origin list allows any origin, which is what local
//! development expects. Deployments list their front-end origins in
//! `CORS_ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};

/// Preflight cache lifetime in seconds
const CORS_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance for the configured origins.
pub fn create_cors(allowed_origins: &[String]) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(CORS_MAX_AGE);

    if allowed_origins.is_empty() {
        tracing::debug!("No CORS origins configured, allowing any origin");
        return cors.allow_any_origin();
    }

    for origin in allowed_origins {
        tracing::info!(origin = %origin, "Adding allowed CORS origin");
        cors = cors.allowed_origin(origin);
    }

    cors
}
