//! Organization registration with first-code issuance, plus directory reads

mod service;

#[cfg(test)]
mod tests;

pub use service::{OrganizationService, RegistrationResult, MAX_PAGE_SIZE};
