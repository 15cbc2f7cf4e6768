//! Delete Game Use Case

use std::sync::Arc;

use kernel::id::{GameId, UserId};

use crate::domain::repository::{GameRepository, ReviewRepository};
use crate::error::{GameError, GameResult};

/// Delete a game, creator only, reviews permitting
pub struct DeleteGameUseCase<G: GameRepository, R: ReviewRepository> {
    games: Arc<G>,
    reviews: Arc<R>,
}

impl<G: GameRepository, R: ReviewRepository> DeleteGameUseCase<G, R> {
    pub fn new(games: Arc<G>, reviews: Arc<R>) -> Self {
        Self { games, reviews }
    }

    /// Delete a game along with its platform, wishlist, and owned links.
    /// A game with reviews cannot be deleted.
    pub async fn execute(&self, game_id: GameId, caller_id: UserId) -> GameResult<()> {
        let game = self
            .games
            .find_by_id(game_id)
            .await?
            .ok_or(GameError::NotFound)?;

        if !game.is_created_by(caller_id) {
            return Err(GameError::NotCreator);
        }

        if self.reviews.game_has_reviews(game_id).await? {
            return Err(GameError::HasReviews);
        }

        self.games.delete(game_id).await?;

        tracing::info!(game_id = game_id.value(), "game deleted");

        Ok(())
    }
}
