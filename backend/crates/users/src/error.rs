//! User Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Errors raised by user operations
#[derive(Debug, Error)]
pub enum UserError {
    /// Registration or profile edit targets an email another account holds
    #[error("Email is already in use")]
    EmailInUse,

    /// Login failed; email and password are deliberately not distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, empty, or unrecognized auth token
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated caller may not act on this account
    #[error("Forbidden")]
    Forbidden,

    /// Password change attempted with a wrong current password
    #[error("Incorrect current password")]
    IncorrectCurrentPassword,

    /// Password change attempted with the password already in place
    #[error("New password must differ from the current password")]
    SamePassword,

    /// No user with the requested id
    #[error("User not found")]
    NotFound,

    /// User exists but has no profile image
    #[error("User has no image")]
    ImageNotFound,

    /// Request body or header failed validation
    #[error("{0}")]
    Validation(String),

    /// Stored image filename has an extension no content type maps to
    #[error("Stored image has an unrecognized file type")]
    CorruptImageRecord,

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Filesystem operation on the image store failed
    #[error("Image storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result alias for user operations
pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Error kind for HTTP mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmailInUse | Self::Forbidden | Self::SamePassword => ErrorKind::Forbidden,
            Self::InvalidCredentials | Self::Unauthorized | Self::IncorrectCurrentPassword => {
                ErrorKind::Unauthorized
            }
            Self::NotFound | Self::ImageNotFound => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::BadRequest,
            Self::CorruptImageRecord | Self::Database(_) | Self::Storage(_) | Self::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error at a severity matching its kind
    pub fn log(&self) {
        if self.kind().is_server_error() {
            tracing::error!(error = %self, "user operation failed");
        } else {
            tracing::debug!(error = %self, "user request rejected");
        }
    }

    /// Convert to the kernel error type
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }
}

impl From<axum::extract::rejection::JsonRejection> for UserError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(UserError::EmailInUse.status_code(), 403);
        assert_eq!(UserError::InvalidCredentials.status_code(), 401);
        assert_eq!(UserError::Unauthorized.status_code(), 401);
        assert_eq!(UserError::IncorrectCurrentPassword.status_code(), 401);
        assert_eq!(UserError::Forbidden.status_code(), 403);
        assert_eq!(UserError::SamePassword.status_code(), 403);
        assert_eq!(UserError::NotFound.status_code(), 404);
        assert_eq!(UserError::ImageNotFound.status_code(), 404);
        assert_eq!(UserError::Validation("bad".into()).status_code(), 400);
        assert_eq!(UserError::CorruptImageRecord.status_code(), 500);
        assert_eq!(UserError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_credentials_message_is_generic() {
        // The message must not reveal whether the email exists
        let message = UserError::InvalidCredentials.to_string();
        assert!(!message.to_lowercase().contains("not found"));
        assert!(!message.to_lowercase().contains("exist"));
    }
}
