//! # OrgVerify API
//!
//! actix-web surface for organization registration and contact-email
//! verification. Handlers are generic over the repository and email
//! dispatcher implementations so the binary can wire MySQL or in-memory
//! storage and tests can drive the routes with mocks.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod routes;
