//! Logout Use Case

use std::sync::Arc;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::error::UserResult;

/// End the caller's session
pub struct LogoutUseCase<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> LogoutUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Clear the caller's session token. Idempotence is irrelevant here:
    /// without a valid token the request never reaches this point.
    pub async fn execute(&self, caller: &User) -> UserResult<()> {
        self.repository.clear_token(caller.user_id).await?;
        tracing::info!(user_id = caller.user_id.value(), "user logged out");
        Ok(())
    }
}
