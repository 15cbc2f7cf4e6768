//! Game Entities

use chrono::{DateTime, Utc};
use kernel::id::{GameId, GenreId, PlatformId, UserId};

/// Bare game row, used for existence and authorization checks
#[derive(Debug, Clone)]
pub struct Game {
    pub game_id: GameId,
    pub title: String,
    pub description: String,
    pub genre_id: GenreId,
    pub price: i32,
    pub creation_date: DateTime<Utc>,
    pub creator_id: UserId,
    pub image_filename: Option<String>,
}

impl Game {
    /// Whether `user_id` created this game
    pub fn is_created_by(&self, user_id: UserId) -> bool {
        self.creator_id == user_id
    }
}

/// One entry in a search result
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub game_id: GameId,
    pub title: String,
    pub genre_id: GenreId,
    pub creation_date: DateTime<Utc>,
    pub creator_id: UserId,
    pub price: i32,
    pub creator_first_name: String,
    pub creator_last_name: String,
    /// Mean review rating, 0 when unreviewed
    pub rating: f64,
    pub platform_ids: Vec<PlatformId>,
}

/// Full detail for a single game
#[derive(Debug, Clone)]
pub struct GameDetail {
    pub summary: GameSummary,
    pub description: String,
    pub number_of_owners: i64,
    pub number_of_wishlists: i64,
}

/// Fields required to create a game
#[derive(Debug, Clone)]
pub struct NewGame {
    pub title: String,
    pub description: String,
    pub genre_id: GenreId,
    pub price: i32,
    pub platform_ids: Vec<PlatformId>,
}

/// Fully merged state written by an edit.
///
/// The use case folds the partial request into the current row before
/// this reaches the repository; `platform_ids` stays `None` when the
/// platform list is untouched.
#[derive(Debug, Clone)]
pub struct GameUpdate {
    pub title: String,
    pub description: String,
    pub genre_id: GenreId,
    pub price: i32,
    pub platform_ids: Option<Vec<PlatformId>>,
}
