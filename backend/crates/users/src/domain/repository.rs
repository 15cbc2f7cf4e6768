//! User Repository Trait

use kernel::id::UserId;

use crate::domain::entity::{NewUser, ProfileChanges, User};
use crate::error::UserResult;

/// Persistence operations for accounts
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new account and return its generated id
    async fn insert(&self, new_user: &NewUser) -> UserResult<UserId>;

    /// Find a user by id
    async fn find_by_id(&self, user_id: UserId) -> UserResult<Option<User>>;

    /// Find a user by email (emails are unique)
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Find the user holding a live session token
    async fn find_by_token(&self, token: &str) -> UserResult<Option<User>>;

    /// Whether any account already uses this email
    async fn email_in_use(&self, email: &str) -> UserResult<bool>;

    /// Store a fresh session token, replacing any previous one
    async fn set_token(&self, user_id: UserId, token: &str) -> UserResult<()>;

    /// Clear the session token, ending the session
    async fn clear_token(&self, user_id: UserId) -> UserResult<()>;

    /// Apply a partial profile update
    async fn update_profile(&self, user_id: UserId, changes: &ProfileChanges) -> UserResult<()>;

    /// Record or clear the profile image filename
    async fn set_image_filename(
        &self,
        user_id: UserId,
        filename: Option<&str>,
    ) -> UserResult<()>;
}
