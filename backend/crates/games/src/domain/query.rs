//! Game Search Query Model
//!
//! Filters combine with AND, except the free-text term: a title match is
//! ORed against everything after it in the WHERE clause, which mirrors
//! the legacy query this search preserves. Pagination happens in process
//! after the full result set is fetched, and the reported total is the
//! unpaginated match count.

use kernel::id::{GenreId, PlatformId, UserId};
use serde::Deserialize;

/// Sort orders for game search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameSort {
    AlphabeticalAsc,
    AlphabeticalDesc,
    PriceAsc,
    PriceDesc,
    #[default]
    CreatedAsc,
    CreatedDesc,
    RatingAsc,
    RatingDesc,
}

impl GameSort {
    /// ORDER BY clause fragment, including the leading space
    pub fn order_clause(&self) -> &'static str {
        match self {
            Self::AlphabeticalAsc => " ORDER BY game.title ASC",
            Self::AlphabeticalDesc => " ORDER BY game.title DESC",
            Self::PriceAsc => " ORDER BY game.price ASC",
            Self::PriceDesc => " ORDER BY game.price DESC",
            Self::CreatedAsc => " ORDER BY game.creation_date ASC",
            Self::CreatedDesc => " ORDER BY game.creation_date DESC",
            Self::RatingAsc => " ORDER BY rating ASC",
            Self::RatingDesc => " ORDER BY rating DESC",
        }
    }
}

/// Filter set for a game search, already validated and resolved
#[derive(Debug, Clone, Default)]
pub struct GameFilter {
    /// Free-text term matched against title and description
    pub q: Option<String>,
    pub genre_ids: Vec<GenreId>,
    pub platform_ids: Vec<PlatformId>,
    /// Inclusive price ceiling in cents
    pub max_price: Option<i32>,
    pub creator_id: Option<UserId>,
    /// Only games this user has reviewed
    pub reviewer_id: Option<UserId>,
    /// Only games this user owns
    pub owned_by: Option<UserId>,
    /// Only games on this user's wishlist
    pub wishlisted_by: Option<UserId>,
    pub sort: GameSort,
}

/// Slice a full result set down to the requested page.
///
/// Returns the page and the total match count. A start index past the
/// end yields an empty page, never an error.
pub fn paginate<T>(rows: Vec<T>, start_index: Option<usize>, count: Option<usize>) -> (Vec<T>, usize) {
    let total = rows.len();
    let start = start_index.unwrap_or(0).min(total);
    let end = match count {
        Some(count) => start.saturating_add(count).min(total),
        None => total,
    };
    let page = rows.into_iter().skip(start).take(end - start).collect();
    (page, total)
}
