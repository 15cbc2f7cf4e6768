//! Get Game Use Case

use std::sync::Arc;

use kernel::id::GameId;

use crate::domain::entity::GameDetail;
use crate::domain::repository::GameRepository;
use crate::error::{GameError, GameResult};

/// Fetch the full detail view of one game
pub struct GetGameUseCase<G: GameRepository> {
    repository: Arc<G>,
}

impl<G: GameRepository> GetGameUseCase<G> {
    pub fn new(repository: Arc<G>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, game_id: GameId) -> GameResult<GameDetail> {
        self.repository
            .find_detail(game_id)
            .await?
            .ok_or(GameError::NotFound)
    }
}
