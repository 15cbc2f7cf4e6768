//! Game Repository Traits

use kernel::id::{GameId, GenreId, PlatformId, UserId};

use crate::domain::entity::{Game, GameDetail, GameSummary, GameUpdate, Genre, NewGame, Platform, Review};
use crate::domain::query::GameFilter;
use crate::error::GameResult;

/// Persistence operations for games and reference data
#[trait_variant::make(GameRepository: Send)]
pub trait LocalGameRepository {
    /// All genres
    async fn genres(&self) -> GameResult<Vec<Genre>>;

    /// All platforms
    async fn platforms(&self) -> GameResult<Vec<Platform>>;

    /// Whether every id in the list names an existing genre
    async fn all_genres_exist(&self, ids: &[GenreId]) -> GameResult<bool>;

    /// Whether every id in the list names an existing platform
    async fn all_platforms_exist(&self, ids: &[PlatformId]) -> GameResult<bool>;

    /// Run a filtered, sorted search over the whole catalogue
    async fn search(&self, filter: &GameFilter) -> GameResult<Vec<GameSummary>>;

    /// Fetch a bare game row
    async fn find_by_id(&self, game_id: GameId) -> GameResult<Option<Game>>;

    /// Fetch the full detail view of a game
    async fn find_detail(&self, game_id: GameId) -> GameResult<Option<GameDetail>>;

    /// Fetch a bare game row by exact title
    async fn find_by_title(&self, title: &str) -> GameResult<Option<Game>>;

    /// Insert a game and its platform links in one transaction
    async fn insert(&self, creator_id: UserId, new_game: &NewGame) -> GameResult<GameId>;

    /// Write merged game state; replaces platform links when present
    async fn update(&self, game_id: GameId, update: &GameUpdate) -> GameResult<()>;

    /// Delete a game and its platform, wishlist, and owned links
    async fn delete(&self, game_id: GameId) -> GameResult<()>;

    /// Record the hero image filename
    async fn set_image_filename(&self, game_id: GameId, filename: &str) -> GameResult<()>;
}

/// Persistence operations for reviews
#[trait_variant::make(ReviewRepository: Send)]
pub trait LocalReviewRepository {
    /// Reviews for a game, newest first
    async fn reviews_for_game(&self, game_id: GameId) -> GameResult<Vec<Review>>;

    /// Whether this user has already reviewed this game
    async fn review_exists(&self, user_id: UserId, game_id: GameId) -> GameResult<bool>;

    /// Whether the game has any reviews at all
    async fn game_has_reviews(&self, game_id: GameId) -> GameResult<bool>;

    /// Insert a review, stamping the current time
    async fn insert_review(
        &self,
        user_id: UserId,
        game_id: GameId,
        rating: i32,
        review: Option<&str>,
    ) -> GameResult<()>;
}

/// Persistence operations for wishlist and ownership marks
#[trait_variant::make(ActionRepository: Send)]
pub trait LocalActionRepository {
    /// Whether the game is on the user's wishlist
    async fn is_wishlisted(&self, user_id: UserId, game_id: GameId) -> GameResult<bool>;

    /// Add the game to the user's wishlist
    async fn add_to_wishlist(&self, user_id: UserId, game_id: GameId) -> GameResult<()>;

    /// Remove the game from the user's wishlist
    async fn remove_from_wishlist(&self, user_id: UserId, game_id: GameId) -> GameResult<()>;

    /// Whether the user has marked the game as owned
    async fn is_owned(&self, user_id: UserId, game_id: GameId) -> GameResult<bool>;

    /// Mark the game as owned by the user
    async fn add_to_owned(&self, user_id: UserId, game_id: GameId) -> GameResult<()>;

    /// Remove the user's ownership mark
    async fn remove_from_owned(&self, user_id: UserId, game_id: GameId) -> GameResult<()>;
}
