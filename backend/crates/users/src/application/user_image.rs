//! User Image Use Cases
//!
//! Profile image retrieval, upload, and deletion over the flat image
//! store. The file write and the `image_filename` column update are two
//! separate steps, not a transaction.

use std::sync::Arc;

use kernel::id::UserId;
use platform::storage::{ImageStore, ImageType, image_filename};

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::error::{UserError, UserResult};

/// Whether an upload created a first image or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSetOutcome {
    Created,
    Replaced,
}

/// Profile image operations
pub struct UserImageUseCase<R: UserRepository> {
    repository: Arc<R>,
    store: ImageStore,
}

impl<R: UserRepository> UserImageUseCase<R> {
    pub fn new(repository: Arc<R>, store: ImageStore) -> Self {
        Self { repository, store }
    }

    /// Fetch a user's profile image bytes and content type
    pub async fn get(&self, user_id: UserId) -> UserResult<(Vec<u8>, ImageType)> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound)?;

        let filename = user.image_filename.ok_or(UserError::ImageNotFound)?;

        // The stored extension must map back to a content type; if it
        // does not, the row and the store have diverged.
        let image_type =
            ImageType::from_filename(&filename).ok_or(UserError::CorruptImageRecord)?;

        let bytes = self.store.read(&filename).await?;

        Ok((bytes, image_type))
    }

    /// Upload or replace the caller's own profile image.
    ///
    /// A replacement with a different extension leaves the old file on
    /// disk; only the filename column is authoritative.
    pub async fn set(
        &self,
        caller: &User,
        target: UserId,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> UserResult<ImageSetOutcome> {
        if !caller.is(target) {
            return Err(UserError::Forbidden);
        }

        let image_type = content_type
            .and_then(ImageType::from_content_type)
            .ok_or_else(|| {
                UserError::Validation("Content-Type must be image/png, image/jpeg or image/gif".to_string())
            })?;

        let had_image = caller.image_filename.is_some();
        let filename = image_filename("user", target.value(), image_type);

        self.store.write(&filename, bytes).await?;
        self.repository
            .set_image_filename(target, Some(&filename))
            .await?;

        tracing::info!(user_id = target.value(), filename = %filename, "profile image stored");

        Ok(if had_image {
            ImageSetOutcome::Replaced
        } else {
            ImageSetOutcome::Created
        })
    }

    /// Delete the caller's own profile image
    pub async fn delete(&self, caller: &User, target: UserId) -> UserResult<()> {
        if !caller.is(target) {
            return Err(UserError::Forbidden);
        }

        let filename = caller
            .image_filename
            .as_deref()
            .ok_or(UserError::ImageNotFound)?;

        self.store.delete(filename).await?;
        self.repository.set_image_filename(target, None).await?;

        tracing::info!(user_id = target.value(), "profile image deleted");

        Ok(())
    }
}
