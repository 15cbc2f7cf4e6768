//! Token Authentication Helpers
//!
//! Resolve the `X-Authorization` header to a user row. Other modules
//! authenticate through these too, so the session model has one home.

use http::HeaderMap;
use platform::token::extract_token;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

/// Require a valid session token; missing or unknown tokens are 401
pub async fn authenticate<R: UserRepository>(
    repository: &R,
    headers: &HeaderMap,
) -> UserResult<User> {
    let token = extract_token(headers).ok_or(UserError::Unauthorized)?;

    repository
        .find_by_token(token)
        .await?
        .ok_or(UserError::Unauthorized)
}

/// Resolve a session token if one is present and valid.
///
/// An absent or unrecognized token yields `None` rather than an error;
/// endpoints with optional auth treat such callers as anonymous.
pub async fn maybe_authenticate<R: UserRepository>(
    repository: &R,
    headers: &HeaderMap,
) -> UserResult<Option<User>> {
    let Some(token) = extract_token(headers) else {
        return Ok(None);
    };

    repository.find_by_token(token).await
}
