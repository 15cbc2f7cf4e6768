//! Users Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity and repository trait
//! - `application/` - Use cases (register, login, logout, profile, avatar)
//! - `infra/` - PostgreSQL repository
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Session Model
//! One opaque 16-character token per account, stored on the user row and
//! carried in the `X-Authorization` header. Logging in generates a fresh
//! token and overwrites the previous one, so at most one session is ever
//! valid per account. Logging out clears the column.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::UsersConfig;
pub use error::{UserError, UserResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::router::users_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
