//! Error taxonomy of the one-time code workflow
//!
//! Only `Internal` represents a fault. The other variants are business
//! outcomes that callers are expected to handle.

use thiserror::Error;

use super::DomainError;

/// One-time code workflow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// No matching record, or no such organization
    #[error("Verification code or organization not found")]
    NotFound,

    #[error("Verification code expired")]
    Expired,

    /// Lifetime issuance cap reached
    #[error("Maximum number of verification codes issued")]
    AttemptExceeded,

    /// A unique key (code or organization) is already taken
    #[error("Verification record already exists")]
    AlreadyExists,

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl OtpError {
    pub fn internal(message: impl Into<String>) -> Self {
        OtpError::Internal {
            message: message.into(),
        }
    }

    /// Whether this error is a fault rather than a business outcome
    pub fn is_internal(&self) -> bool {
        matches!(self, OtpError::Internal { .. })
    }
}

/// Classifies collaborator errors into the workflow taxonomy
impl From<DomainError> for OtpError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Otp(inner) => inner,
            DomainError::NotFound { .. } => OtpError::NotFound,
            DomainError::Conflict { .. } => OtpError::AlreadyExists,
            DomainError::Validation { message } | DomainError::Internal { message } => {
                OtpError::Internal { message }
            }
        }
    }
}

pub type OtpResult<T> = Result<T, OtpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_classification() {
        let not_found = DomainError::NotFound {
            resource: "organization 9".to_string(),
        };
        assert_eq!(OtpError::from(not_found), OtpError::NotFound);

        let conflict = DomainError::Conflict {
            message: "code taken".to_string(),
        };
        assert_eq!(OtpError::from(conflict), OtpError::AlreadyExists);

        let bridged = DomainError::Otp(OtpError::Expired);
        assert_eq!(OtpError::from(bridged), OtpError::Expired);
    }

    #[test]
    fn test_internal_keeps_message() {
        let err = OtpError::from(DomainError::Internal {
            message: "connection reset".to_string(),
        });
        assert!(err.is_internal());
        assert_eq!(err.to_string(), "Internal error: connection reset");
    }

    #[test]
    fn test_otp_error_bridges_into_domain_error() {
        let err: DomainError = OtpError::AttemptExceeded.into();
        assert!(matches!(err, DomainError::Otp(OtpError::AttemptExceeded)));
    }
}
