//! Create Game Use Case

use std::sync::Arc;

use kernel::id::{GameId, GenreId, PlatformId, UserId};

use crate::application::validation::{validate_description, validate_price, validate_title};
use crate::domain::entity::NewGame;
use crate::domain::repository::GameRepository;
use crate::error::{GameError, GameResult};

/// Input for game creation
#[derive(Debug)]
pub struct CreateGameInput {
    pub title: String,
    pub description: String,
    pub genre_id: GenreId,
    pub price: i32,
    pub platform_ids: Vec<PlatformId>,
}

/// Create a game owned by the caller
pub struct CreateGameUseCase<G: GameRepository> {
    repository: Arc<G>,
}

impl<G: GameRepository> CreateGameUseCase<G> {
    pub fn new(repository: Arc<G>) -> Self {
        Self { repository }
    }

    /// Create a game and return its id.
    ///
    /// Titles are globally unique; a clash is 403, not 400, to keep it
    /// apart from schema-level validation failures.
    pub async fn execute(&self, creator_id: UserId, input: CreateGameInput) -> GameResult<GameId> {
        validate_title(&input.title)?;
        validate_description(&input.description)?;
        validate_price(input.price)?;

        if input.platform_ids.is_empty() {
            return Err(GameError::Validation(
                "platformIds must contain at least one platform".to_string(),
            ));
        }
        if !self.repository.all_genres_exist(&[input.genre_id]).await? {
            return Err(GameError::Validation("unknown genreId".to_string()));
        }
        if !self.repository.all_platforms_exist(&input.platform_ids).await? {
            return Err(GameError::Validation("unknown platformId".to_string()));
        }

        if self.repository.find_by_title(&input.title).await?.is_some() {
            return Err(GameError::TitleTaken);
        }

        let game_id = self
            .repository
            .insert(
                creator_id,
                &NewGame {
                    title: input.title,
                    description: input.description,
                    genre_id: input.genre_id,
                    price: input.price,
                    platform_ids: input.platform_ids,
                },
            )
            .await?;

        tracing::info!(
            game_id = game_id.value(),
            creator_id = creator_id.value(),
            "game created"
        );

        Ok(game_id)
    }
}
