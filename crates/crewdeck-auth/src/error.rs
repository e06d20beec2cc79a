//! Authentication error types.

use thiserror::Error;

/// A result type using `AuthError`.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login lookup failed or the password digest did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The registration email lacks the required organizational suffix.
    #[error("email must end with {required}")]
    InvalidDomain {
        /// The required domain suffix.
        required: String,
    },

    /// The two supplied registration passwords differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// The email already has a credential record.
    #[error("account already exists")]
    AlreadyExists,

    /// The email is neither in the agent directory nor the admin allow-list.
    #[error("no agents mapped to {0}")]
    Unmapped(String),

    /// Storage layer error.
    #[error("storage error: {0}")]
    Store(#[from] crewdeck_store::StoreError),
}

impl AuthError {
    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidCredentials => 401,
            Self::Unmapped(_) => 403,
            Self::AlreadyExists => 409,
            Self::InvalidDomain { .. } | Self::PasswordMismatch => 422,
            Self::Store(_) => 500,
        }
    }

    /// Returns `true` if this failure must also be recorded in the error log.
    ///
    /// Pure input validation is shown to the user only; credential and
    /// mapping failures are durably logged.
    #[must_use]
    pub const fn is_logged(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::Unmapped(_) | Self::Store(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.http_status_code(), 401);
        assert_eq!(
            AuthError::Unmapped("x@x.com".into()).http_status_code(),
            403
        );
        assert_eq!(AuthError::AlreadyExists.http_status_code(), 409);
        assert_eq!(AuthError::PasswordMismatch.http_status_code(), 422);
        assert_eq!(
            AuthError::InvalidDomain {
                required: "@x.com".into()
            }
            .http_status_code(),
            422
        );
    }

    #[test]
    fn logged_errors() {
        assert!(AuthError::InvalidCredentials.is_logged());
        assert!(AuthError::Unmapped("x@x.com".into()).is_logged());
        assert!(!AuthError::PasswordMismatch.is_logged());
        assert!(!AuthError::AlreadyExists.is_logged());
    }
}
