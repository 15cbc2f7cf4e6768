//! Update Profile Use Case

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::config::UsersConfig;
use crate::application::validation::{validate_email, validate_name};
use crate::domain::entity::{ProfileChanges, User};
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

/// Input for a profile edit; absent fields are left unchanged
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub current_password: Option<String>,
}

/// Edit the caller's own profile
pub struct UpdateProfileUseCase<R: UserRepository> {
    repository: Arc<R>,
    config: Arc<UsersConfig>,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub fn new(repository: Arc<R>, config: Arc<UsersConfig>) -> Self {
        Self { repository, config }
    }

    /// Apply a partial edit to the target profile.
    ///
    /// Only the account owner may edit. A password change requires the
    /// current password and rejects reusing it; an email change rejects
    /// addresses held by another account.
    pub async fn execute(
        &self,
        target: UserId,
        caller: &User,
        input: UpdateProfileInput,
    ) -> UserResult<()> {
        if !caller.is(target) {
            return Err(UserError::Forbidden);
        }

        if let Some(email) = &input.email {
            validate_email(email)?;
        }
        if let Some(first_name) = &input.first_name {
            validate_name("firstName", first_name)?;
        }
        if let Some(last_name) = &input.last_name {
            validate_name("lastName", last_name)?;
        }

        let password_hash = match (&input.password, &input.current_password) {
            (None, None) => None,
            (Some(_), None) => {
                return Err(UserError::Validation(
                    "currentPassword is required to change the password".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(UserError::Validation(
                    "currentPassword provided without a new password".to_string(),
                ));
            }
            (Some(new_password), Some(current_password)) => {
                Some(self.change_password(caller, new_password, current_password)?)
            }
        };

        if let Some(email) = &input.email {
            // A user may resubmit their own address; only another holder blocks
            if let Some(holder) = self.repository.find_by_email(email).await? {
                if !holder.is(target) {
                    return Err(UserError::EmailInUse);
                }
            }
        }

        let changes = ProfileChanges {
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash,
        };

        if !changes.is_empty() {
            self.repository.update_profile(target, &changes).await?;
        }

        tracing::info!(user_id = target.value(), "profile updated");

        Ok(())
    }

    /// Validate a password change and return the new hash
    fn change_password(
        &self,
        caller: &User,
        new_password: &str,
        current_password: &str,
    ) -> UserResult<String> {
        let new_password = ClearTextPassword::new(new_password.to_string())
            .map_err(|e| UserError::Validation(e.to_string()))?;
        let current_password = ClearTextPassword::new(current_password.to_string())
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let stored = HashedPassword::from_phc_string(&caller.password_hash)
            .map_err(|e| UserError::Internal(e.to_string()))?;

        if !stored.verify(&current_password, self.config.pepper()) {
            return Err(UserError::IncorrectCurrentPassword);
        }
        if stored.verify(&new_password, self.config.pepper()) {
            return Err(UserError::SamePassword);
        }

        let hashed = new_password
            .hash(self.config.pepper())
            .map_err(|e| UserError::Internal(e.to_string()))?;

        Ok(hashed.as_phc_string().to_string())
    }
}
