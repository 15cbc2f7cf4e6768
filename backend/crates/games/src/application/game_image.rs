//! Game Image Use Cases
//!
//! Hero image retrieval and upload. Games have no image delete route;
//! an upload can only be replaced. The file write and the column update
//! are two separate steps, not a transaction.

use std::sync::Arc;

use kernel::id::{GameId, UserId};
use platform::storage::{ImageStore, ImageType, image_filename};

use crate::domain::repository::GameRepository;
use crate::error::{GameError, GameResult};

/// Whether an upload created a first image or replaced an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSetOutcome {
    Created,
    Replaced,
}

/// Hero image operations
pub struct GameImageUseCase<G: GameRepository> {
    repository: Arc<G>,
    store: ImageStore,
}

impl<G: GameRepository> GameImageUseCase<G> {
    pub fn new(repository: Arc<G>, store: ImageStore) -> Self {
        Self { repository, store }
    }

    /// Fetch a game's hero image bytes and content type
    pub async fn get(&self, game_id: GameId) -> GameResult<(Vec<u8>, ImageType)> {
        let game = self
            .repository
            .find_by_id(game_id)
            .await?
            .ok_or(GameError::NotFound)?;

        let filename = game.image_filename.ok_or(GameError::ImageNotFound)?;

        let image_type =
            ImageType::from_filename(&filename).ok_or(GameError::CorruptImageRecord)?;

        let bytes = self.store.read(&filename).await?;

        Ok((bytes, image_type))
    }

    /// Upload or replace a game's hero image, creator only.
    ///
    /// A replacement with a different extension leaves the old file on
    /// disk; only the filename column is authoritative.
    pub async fn set(
        &self,
        caller_id: UserId,
        game_id: GameId,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> GameResult<ImageSetOutcome> {
        let game = self
            .repository
            .find_by_id(game_id)
            .await?
            .ok_or(GameError::NotFound)?;

        if !game.is_created_by(caller_id) {
            return Err(GameError::NotCreator);
        }

        let image_type = content_type
            .and_then(ImageType::from_content_type)
            .ok_or_else(|| {
                GameError::Validation(
                    "Content-Type must be image/png, image/jpeg or image/gif".to_string(),
                )
            })?;

        let had_image = game.image_filename.is_some();
        let filename = image_filename("game", game_id.value(), image_type);

        self.store.write(&filename, bytes).await?;
        self.repository.set_image_filename(game_id, &filename).await?;

        tracing::info!(game_id = game_id.value(), filename = %filename, "game image stored");

        Ok(if had_image {
            ImageSetOutcome::Replaced
        } else {
            ImageSetOutcome::Created
        })
    }
}
