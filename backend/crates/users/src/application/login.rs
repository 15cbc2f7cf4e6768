//! Login Use Case

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::{ClearTextPassword, HashedPassword};
use platform::token::generate_token;

use crate::application::config::UsersConfig;
use crate::application::validation::validate_email;
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

/// Input for login
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful login result
#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: UserId,
    pub token: String,
}

/// Authenticate by email and password, issuing a fresh session token
pub struct LoginUseCase<R: UserRepository> {
    repository: Arc<R>,
    config: Arc<UsersConfig>,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub fn new(repository: Arc<R>, config: Arc<UsersConfig>) -> Self {
        Self { repository, config }
    }

    /// Log in and return the user id with a new token.
    ///
    /// Any previous token for the account is overwritten, so a second
    /// login invalidates the first session.
    pub async fn execute(&self, input: LoginInput) -> UserResult<LoginOutput> {
        validate_email(&input.email)?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let user = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let hashed = HashedPassword::from_phc_string(&user.password_hash)
            .map_err(|e| UserError::Internal(e.to_string()))?;

        if !hashed.verify(&password, self.config.pepper()) {
            return Err(UserError::InvalidCredentials);
        }

        let token = generate_token();
        self.repository.set_token(user.user_id, &token).await?;

        tracing::info!(user_id = user.user_id.value(), "user logged in");

        Ok(LoginOutput {
            user_id: user.user_id,
            token,
        })
    }
}
