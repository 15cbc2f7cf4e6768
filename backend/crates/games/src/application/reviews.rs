//! Review Use Cases

use std::sync::Arc;

use kernel::id::{GameId, UserId};

use crate::application::validation::validate_rating;
use crate::domain::entity::Review;
use crate::domain::repository::{GameRepository, ReviewRepository};
use crate::error::{GameError, GameResult};

/// Listing and submitting reviews
pub struct ReviewsUseCase<G: GameRepository, R: ReviewRepository> {
    games: Arc<G>,
    reviews: Arc<R>,
}

impl<G: GameRepository, R: ReviewRepository> ReviewsUseCase<G, R> {
    pub fn new(games: Arc<G>, reviews: Arc<R>) -> Self {
        Self { games, reviews }
    }

    /// Reviews for a game, newest first
    pub async fn list(&self, game_id: GameId) -> GameResult<Vec<Review>> {
        if self.games.find_by_id(game_id).await?.is_none() {
            return Err(GameError::NotFound);
        }

        self.reviews.reviews_for_game(game_id).await
    }

    /// Submit a review.
    ///
    /// One review per user per game, and never on your own game. The
    /// duplicate check and the insert are separate statements; two
    /// racing submissions land on the unique index instead.
    pub async fn submit(
        &self,
        caller_id: UserId,
        game_id: GameId,
        rating: i32,
        review: Option<&str>,
    ) -> GameResult<()> {
        validate_rating(rating)?;

        let game = self
            .games
            .find_by_id(game_id)
            .await?
            .ok_or(GameError::NotFound)?;

        if game.is_created_by(caller_id) {
            return Err(GameError::OwnReview);
        }

        if self.reviews.review_exists(caller_id, game_id).await? {
            return Err(GameError::AlreadyReviewed);
        }

        self.reviews
            .insert_review(caller_id, game_id, rating, review)
            .await?;

        tracing::info!(
            game_id = game_id.value(),
            reviewer_id = caller_id.value(),
            rating,
            "review submitted"
        );

        Ok(())
    }
}
