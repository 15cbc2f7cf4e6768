//! Game Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;
use users::UserError;

/// Errors raised by game, review, and action operations
#[derive(Debug, Error)]
pub enum GameError {
    /// No game with the requested id
    #[error("Game not found")]
    NotFound,

    /// Another game already carries this title
    #[error("Game title already exists")]
    TitleTaken,

    /// Only the game's creator may perform this operation
    #[error("Only the creator may modify this game")]
    NotCreator,

    /// Games with reviews cannot be deleted
    #[error("Cannot delete a game that has reviews")]
    HasReviews,

    /// Creators cannot review their own games
    #[error("Cannot review your own game")]
    OwnReview,

    /// One review per user per game
    #[error("You have already reviewed this game")]
    AlreadyReviewed,

    /// Creators cannot wishlist or own their own games
    #[error("Cannot wishlist or own your own game")]
    OwnGameAction,

    /// Wishlist add on a game already wishlisted
    #[error("Game is already wishlisted")]
    AlreadyWishlisted,

    /// Wishlist remove on a game not wishlisted
    #[error("Game is not wishlisted")]
    NotWishlisted,

    /// Wishlist add on a game already owned
    #[error("Cannot wishlist a game that is already owned")]
    WishlistOwnedGame,

    /// Owned add on a game already owned
    #[error("Game is already marked as owned")]
    AlreadyOwned,

    /// Owned remove on a game not owned
    #[error("Game is not marked as owned")]
    NotOwned,

    /// Game exists but has no image
    #[error("Game has no image")]
    ImageNotFound,

    /// Missing, empty, or unrecognized auth token
    #[error("Unauthorized")]
    Unauthorized,

    /// Request parameters or body failed validation
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

/// Result alias for game operations
pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Error kind for HTTP mapping
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound | Self::ImageNotFound => ErrorKind::NotFound,
            Self::TitleTaken
            | Self::NotCreator
            | Self::HasReviews
            | Self::OwnReview
            | Self::AlreadyReviewed
            | Self::OwnGameAction
            | Self::AlreadyWishlisted
            | Self::NotWishlisted
            | Self::WishlistOwnedGame
            | Self::AlreadyOwned
            | Self::NotOwned => ErrorKind::Forbidden,
            Self::Unauthorized => ErrorKind::Unauthorized,
            Self::Validation(_) => ErrorKind::BadRequest,
            Self::CorruptImageRecord | Self::Database(_) | Self::Storage(_) | Self::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Log the error at a severity matching its kind
    pub fn log(&self) {
        if self.kind().is_server_error() {
            tracing::error!(error = %self, "game operation failed");
        } else {
            tracing::debug!(error = %self, "game request rejected");
        }
    }

    /// Convert to the kernel error type
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }
}

/// Auth and lookup failures surfaced while authenticating game requests
impl From<UserError> for GameError {
    fn from(error: UserError) -> Self {
        match error {
            UserError::Unauthorized => Self::Unauthorized,
            UserError::Database(e) => Self::Database(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for GameError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
