//! Edit Game Use Case

use std::sync::Arc;

use kernel::id::{GameId, GenreId, PlatformId, UserId};

use crate::application::validation::{validate_description, validate_price, validate_title};
use crate::domain::entity::GameUpdate;
use crate::domain::repository::GameRepository;
use crate::error::{GameError, GameResult};

/// Partial edit; absent fields keep their current values
#[derive(Debug, Default)]
pub struct EditGameInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre_id: Option<GenreId>,
    pub price: Option<i32>,
    pub platform_ids: Option<Vec<PlatformId>>,
}

/// Edit a game, creator only
pub struct EditGameUseCase<G: GameRepository> {
    repository: Arc<G>,
}

impl<G: GameRepository> EditGameUseCase<G> {
    pub fn new(repository: Arc<G>) -> Self {
        Self { repository }
    }

    /// Apply a partial edit.
    ///
    /// The uniqueness check for a new title excludes the game being
    /// edited, so resubmitting the current title is a no-op rather than
    /// a conflict.
    pub async fn execute(
        &self,
        game_id: GameId,
        caller_id: UserId,
        input: EditGameInput,
    ) -> GameResult<()> {
        let game = self
            .repository
            .find_by_id(game_id)
            .await?
            .ok_or(GameError::NotFound)?;

        if !game.is_created_by(caller_id) {
            return Err(GameError::NotCreator);
        }

        if let Some(title) = &input.title {
            validate_title(title)?;
            if let Some(holder) = self.repository.find_by_title(title).await? {
                if holder.game_id != game_id {
                    return Err(GameError::TitleTaken);
                }
            }
        }
        if let Some(description) = &input.description {
            validate_description(description)?;
        }
        if let Some(price) = input.price {
            validate_price(price)?;
        }
        if let Some(genre_id) = input.genre_id {
            if !self.repository.all_genres_exist(&[genre_id]).await? {
                return Err(GameError::Validation("unknown genreId".to_string()));
            }
        }
        if let Some(platform_ids) = &input.platform_ids {
            if platform_ids.is_empty() {
                return Err(GameError::Validation(
                    "platformIds must contain at least one platform".to_string(),
                ));
            }
            if !self.repository.all_platforms_exist(platform_ids).await? {
                return Err(GameError::Validation("unknown platformId".to_string()));
            }
        }

        let update = GameUpdate {
            title: input.title.unwrap_or(game.title),
            description: input.description.unwrap_or(game.description),
            genre_id: input.genre_id.unwrap_or(game.genre_id),
            price: input.price.unwrap_or(game.price),
            platform_ids: input.platform_ids,
        };

        self.repository.update(game_id, &update).await?;

        tracing::info!(game_id = game_id.value(), "game updated");

        Ok(())
    }
}
