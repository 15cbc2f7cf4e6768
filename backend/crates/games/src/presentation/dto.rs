//! Game DTOs
//!
//! Request and response bodies use camelCase field names on the wire.
//! List parameters arrive as query strings; id lists repeat the key
//! (`genreIds=1&genreIds=2`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{GameDetail, GameSummary, Genre, Platform, Review};
use crate::domain::query::GameSort;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListQuery {
    pub start_index: Option<u32>,
    pub count: Option<u32>,
    pub q: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub platform_ids: Vec<i64>,
    pub price: Option<i32>,
    pub creator_id: Option<i64>,
    pub reviewer_id: Option<i64>,
    pub sort_by: Option<GameSort>,
    pub owned_by_me: Option<bool>,
    pub wishlisted_by_me: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummaryDto {
    pub game_id: i64,
    pub title: String,
    pub genre_id: i64,
    pub creation_date: DateTime<Utc>,
    pub creator_id: i64,
    pub price: i32,
    pub creator_first_name: String,
    pub creator_last_name: String,
    pub rating: f64,
    pub platform_ids: Vec<i64>,
}

impl From<GameSummary> for GameSummaryDto {
    fn from(summary: GameSummary) -> Self {
        Self {
            game_id: summary.game_id.value(),
            title: summary.title,
            genre_id: summary.genre_id.value(),
            creation_date: summary.creation_date,
            creator_id: summary.creator_id.value(),
            price: summary.price,
            creator_first_name: summary.creator_first_name,
            creator_last_name: summary.creator_last_name,
            rating: summary.rating,
            platform_ids: summary.platform_ids.iter().map(|p| p.value()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameListResponse {
    pub games: Vec<GameSummaryDto>,
    /// Total matches before pagination
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDetailDto {
    #[serde(flatten)]
    pub summary: GameSummaryDto,
    pub description: String,
    pub number_of_owners: i64,
    pub number_of_wishlists: i64,
}

impl From<GameDetail> for GameDetailDto {
    fn from(detail: GameDetail) -> Self {
        Self {
            summary: detail.summary.into(),
            description: detail.description,
            number_of_owners: detail.number_of_owners,
            number_of_wishlists: detail.number_of_wishlists,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub title: String,
    pub description: String,
    pub genre_id: i64,
    pub price: i32,
    pub platform_ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub game_id: i64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditGameRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub genre_id: Option<i64>,
    pub price: Option<i32>,
    pub platform_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreDto {
    pub genre_id: i64,
    pub name: String,
}

impl From<Genre> for GenreDto {
    fn from(genre: Genre) -> Self {
        Self {
            genre_id: genre.genre_id.value(),
            name: genre.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDto {
    pub platform_id: i64,
    pub name: String,
}

impl From<Platform> for PlatformDto {
    fn from(platform: Platform) -> Self {
        Self {
            platform_id: platform.platform_id.value(),
            name: platform.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub reviewer_id: i64,
    pub reviewer_first_name: String,
    pub reviewer_last_name: String,
    pub rating: i32,
    pub review: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl From<Review> for ReviewDto {
    fn from(review: Review) -> Self {
        Self {
            reviewer_id: review.reviewer_id.value(),
            reviewer_first_name: review.reviewer_first_name,
            reviewer_last_name: review.reviewer_last_name,
            rating: review.rating,
            review: review.review,
            timestamp: review.timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub review: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::{GameId, GenreId, PlatformId, UserId};

    fn summary() -> GameSummary {
        GameSummary {
            game_id: GameId::from_i64(1),
            title: "Outer Wilds".to_string(),
            genre_id: GenreId::from_i64(2),
            creation_date: "2024-03-01T12:00:00Z".parse().unwrap(),
            creator_id: UserId::from_i64(3),
            price: 3899,
            creator_first_name: "Adam".to_string(),
            creator_last_name: "Anderson".to_string(),
            rating: 9.5,
            platform_ids: vec![PlatformId::from_i64(1), PlatformId::from_i64(2)],
        }
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let json = serde_json::to_value(GameSummaryDto::from(summary())).unwrap();
        assert_eq!(json["gameId"], 1);
        assert_eq!(json["creatorFirstName"], "Adam");
        assert_eq!(json["platformIds"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_detail_flattens_summary_fields() {
        let detail = GameDetail {
            summary: summary(),
            description: "Space archaeology".to_string(),
            number_of_owners: 4,
            number_of_wishlists: 9,
        };
        let json = serde_json::to_value(GameDetailDto::from(detail)).unwrap();
        // Detail fields sit beside the summary fields, not nested under them
        assert_eq!(json["gameId"], 1);
        assert_eq!(json["numberOfOwners"], 4);
        assert_eq!(json["numberOfWishlists"], 9);
        assert_eq!(json["description"], "Space archaeology");
    }

    #[test]
    fn test_list_query_defaults() {
        let query: GameListQuery = serde_json::from_str("{}").unwrap();
        assert!(query.genre_ids.is_empty());
        assert!(query.sort_by.is_none());
        assert!(query.owned_by_me.is_none());
    }

    #[test]
    fn test_create_request_requires_fields() {
        let body = r#"{"title": "T", "description": "D", "genreId": 1, "price": 0}"#;
        assert!(serde_json::from_str::<CreateGameRequest>(body).is_err());
    }
}
