//! Register Use Case

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::application::config::UsersConfig;
use crate::application::validation::{validate_email, validate_name};
use crate::domain::entity::NewUser;
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

/// Input for registration
#[derive(Debug)]
pub struct RegisterInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

/// Create a new account
pub struct RegisterUseCase<R: UserRepository> {
    repository: Arc<R>,
    config: Arc<UsersConfig>,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub fn new(repository: Arc<R>, config: Arc<UsersConfig>) -> Self {
        Self { repository, config }
    }

    /// Register an account and return its id.
    ///
    /// Fails with 400 on field validation, 403 when the email is taken.
    pub async fn execute(&self, input: RegisterInput) -> UserResult<UserId> {
        validate_email(&input.email)?;
        validate_name("firstName", &input.first_name)?;
        validate_name("lastName", &input.last_name)?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if self.repository.email_in_use(&input.email).await? {
            return Err(UserError::EmailInUse);
        }

        let hashed = password
            .hash(self.config.pepper())
            .map_err(|e| UserError::Internal(e.to_string()))?;

        let user_id = self
            .repository
            .insert(&NewUser {
                email: input.email,
                first_name: input.first_name,
                last_name: input.last_name,
                password_hash: hashed.as_phc_string().to_string(),
            })
            .await?;

        tracing::info!(user_id = user_id.value(), "user registered");

        Ok(user_id)
    }
}
