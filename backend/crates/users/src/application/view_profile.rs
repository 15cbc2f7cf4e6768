//! View Profile Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

/// Profile fields visible to the caller
#[derive(Debug)]
pub struct ProfileOutput {
    pub first_name: String,
    pub last_name: String,
    /// Present only when the caller is viewing their own profile
    pub email: Option<String>,
}

/// Fetch a user's public profile
pub struct ViewProfileUseCase<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> ViewProfileUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Look up a profile. The email is included only for the owner;
    /// anonymous callers and other users get names alone.
    pub async fn execute(
        &self,
        user_id: UserId,
        caller: Option<&User>,
    ) -> UserResult<ProfileOutput> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        let is_self = caller.is_some_and(|c| c.is(user_id));

        Ok(ProfileOutput {
            first_name: user.first_name,
            last_name: user.last_name,
            email: is_self.then_some(user.email),
        })
    }
}
