//! PostgreSQL Game Repositories
//!
//! One pool-backed struct implements the game, review, and action
//! repository traits. The search query is assembled dynamically; its
//! clause order, including the unparenthesized OR in the free-text
//! filter, is preserved from the query this search replaces. With a
//! free-text term, a title match short-circuits every filter appended
//! after it. Do not reorder or parenthesize without deciding to change
//! that behavior.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use kernel::id::{GameId, GenreId, PlatformId, UserId};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entity::{
    Game, GameDetail, GameSummary, GameUpdate, Genre, NewGame, Platform, Review,
};
use crate::domain::query::GameFilter;
use crate::domain::repository::{ActionRepository, GameRepository, ReviewRepository};
use crate::error::GameResult;

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct GameRow {
    id: i64,
    title: String,
    description: String,
    genre_id: i64,
    price: i32,
    creation_date: DateTime<Utc>,
    creator_id: i64,
    image_filename: Option<String>,
}

impl GameRow {
    fn into_game(self) -> Game {
        Game {
            game_id: GameId::from_i64(self.id),
            title: self.title,
            description: self.description,
            genre_id: GenreId::from_i64(self.genre_id),
            price: self.price,
            creation_date: self.creation_date,
            creator_id: UserId::from_i64(self.creator_id),
            image_filename: self.image_filename,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GameSummaryRow {
    id: i64,
    title: String,
    genre_id: i64,
    creation_date: DateTime<Utc>,
    creator_id: i64,
    price: i32,
    first_name: String,
    last_name: String,
    rating: f64,
    platform_ids: Option<Vec<i64>>,
}

impl GameSummaryRow {
    fn into_summary(self) -> GameSummary {
        GameSummary {
            game_id: GameId::from_i64(self.id),
            title: self.title,
            genre_id: GenreId::from_i64(self.genre_id),
            creation_date: self.creation_date,
            creator_id: UserId::from_i64(self.creator_id),
            price: self.price,
            creator_first_name: self.first_name,
            creator_last_name: self.last_name,
            rating: self.rating,
            platform_ids: self
                .platform_ids
                .unwrap_or_default()
                .into_iter()
                .map(PlatformId::from_i64)
                .collect(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct GameDetailRow {
    id: i64,
    title: String,
    description: String,
    genre_id: i64,
    creation_date: DateTime<Utc>,
    creator_id: i64,
    price: i32,
    first_name: String,
    last_name: String,
    rating: f64,
    platform_ids: Option<Vec<i64>>,
    number_of_owners: i64,
    number_of_wishlists: i64,
}

impl GameDetailRow {
    fn into_detail(self) -> GameDetail {
        GameDetail {
            summary: GameSummary {
                game_id: GameId::from_i64(self.id),
                title: self.title,
                genre_id: GenreId::from_i64(self.genre_id),
                creation_date: self.creation_date,
                creator_id: UserId::from_i64(self.creator_id),
                price: self.price,
                creator_first_name: self.first_name,
                creator_last_name: self.last_name,
                rating: self.rating,
                platform_ids: self
                    .platform_ids
                    .unwrap_or_default()
                    .into_iter()
                    .map(PlatformId::from_i64)
                    .collect(),
            },
            description: self.description,
            number_of_owners: self.number_of_owners,
            number_of_wishlists: self.number_of_wishlists,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    user_id: i64,
    first_name: String,
    last_name: String,
    rating: i32,
    review: Option<String>,
    timestamp: DateTime<Utc>,
}

impl ReviewRow {
    fn into_review(self) -> Review {
        Review {
            reviewer_id: UserId::from_i64(self.user_id),
            reviewer_first_name: self.first_name,
            reviewer_last_name: self.last_name,
            rating: self.rating,
            review: self.review,
            timestamp: self.timestamp,
        }
    }
}

// ============================================================================
// Search Query Assembly
// ============================================================================

const SELECT_GAME: &str = "SELECT id, title, description, genre_id, price, creation_date, \
                           creator_id, image_filename FROM game";

/// Build the dynamic search query for a filter set.
///
/// Clause order matters: the free-text term goes first after
/// `WHERE true`, and its OR binds everything appended after it into its
/// right-hand side.
fn build_search_query(filter: &GameFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(
        "SELECT game.id, game.title, game.genre_id, game.creation_date, game.creator_id, \
         game.price, creator.first_name, creator.last_name, \
         COALESCE((SELECT AVG(gr.rating) FROM game_review AS gr \
                   WHERE gr.game_id = game.id), 0)::float8 AS rating, \
         (SELECT array_agg(DISTINCT gp.platform_id ORDER BY gp.platform_id) \
          FROM game_platforms AS gp WHERE gp.game_id = game.id) AS platform_ids \
         FROM game \
         JOIN users AS creator ON creator.id = game.creator_id \
         LEFT JOIN game_review ON game_review.game_id = game.id \
         LEFT JOIN game_platforms ON game_platforms.game_id = game.id",
    );

    if let Some(owner) = filter.owned_by {
        query.push(" JOIN owned ON owned.game_id = game.id AND owned.user_id = ");
        query.push_bind(owner.value());
    }
    if let Some(wisher) = filter.wishlisted_by {
        query.push(" JOIN wishlist ON wishlist.game_id = game.id AND wishlist.user_id = ");
        query.push_bind(wisher.value());
    }

    query.push(" WHERE true");

    if let Some(q) = &filter.q {
        let pattern = format!("%{q}%");
        query.push(" AND game.title ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR game.description ILIKE ");
        query.push_bind(pattern);
    }
    if let Some(price) = filter.max_price {
        query.push(" AND game.price <= ");
        query.push_bind(price);
    }
    if let Some(reviewer) = filter.reviewer_id {
        query.push(" AND game_review.user_id = ");
        query.push_bind(reviewer.value());
    }
    if let Some(creator) = filter.creator_id {
        query.push(" AND game.creator_id = ");
        query.push_bind(creator.value());
    }
    if !filter.genre_ids.is_empty() {
        query.push(" AND game.genre_id IN (");
        {
            let mut ids = query.separated(", ");
            for id in &filter.genre_ids {
                ids.push_bind(id.value());
            }
        }
        query.push(")");
    }
    if !filter.platform_ids.is_empty() {
        query.push(" AND game_platforms.platform_id IN (");
        {
            let mut ids = query.separated(", ");
            for id in &filter.platform_ids {
                ids.push_bind(id.value());
            }
        }
        query.push(")");
    }

    query.push(" GROUP BY game.id, creator.id");
    query.push(filter.sort.order_clause());

    query
}

// ============================================================================
// Repository
// ============================================================================

/// PostgreSQL-backed store for games, reviews, and actions
#[derive(Clone)]
pub struct PgGameRepository {
    pool: PgPool,
}

impl PgGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl GameRepository for PgGameRepository {
    async fn genres(&self) -> GameResult<Vec<Genre>> {
        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM genre")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Genre {
                genre_id: GenreId::from_i64(id),
                name,
            })
            .collect())
    }

    async fn platforms(&self) -> GameResult<Vec<Platform>> {
        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM platform")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Platform {
                platform_id: PlatformId::from_i64(id),
                name,
            })
            .collect())
    }

    async fn all_genres_exist(&self, ids: &[GenreId]) -> GameResult<bool> {
        let distinct: BTreeSet<i64> = ids.iter().map(|id| id.value()).collect();
        let distinct: Vec<i64> = distinct.into_iter().collect();

        let (found,): (i64,) =
            sqlx::query_as("SELECT COUNT(DISTINCT id) FROM genre WHERE id = ANY($1)")
                .bind(&distinct)
                .fetch_one(&self.pool)
                .await?;

        Ok(found as usize == distinct.len())
    }

    async fn all_platforms_exist(&self, ids: &[PlatformId]) -> GameResult<bool> {
        let distinct: BTreeSet<i64> = ids.iter().map(|id| id.value()).collect();
        let distinct: Vec<i64> = distinct.into_iter().collect();

        let (found,): (i64,) =
            sqlx::query_as("SELECT COUNT(DISTINCT id) FROM platform WHERE id = ANY($1)")
                .bind(&distinct)
                .fetch_one(&self.pool)
                .await?;

        Ok(found as usize == distinct.len())
    }

    async fn search(&self, filter: &GameFilter) -> GameResult<Vec<GameSummary>> {
        let mut query = build_search_query(filter);

        let rows: Vec<GameSummaryRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(GameSummaryRow::into_summary).collect())
    }

    async fn find_by_id(&self, game_id: GameId) -> GameResult<Option<Game>> {
        let row: Option<GameRow> = sqlx::query_as(&format!("{SELECT_GAME} WHERE id = $1"))
            .bind(game_id.value())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(GameRow::into_game))
    }

    async fn find_detail(&self, game_id: GameId) -> GameResult<Option<GameDetail>> {
        let row: Option<GameDetailRow> = sqlx::query_as(
            "SELECT game.id, game.title, game.description, game.genre_id, game.creation_date, \
             game.creator_id, game.price, creator.first_name, creator.last_name, \
             COALESCE(AVG(game_review.rating), 0)::float8 AS rating, \
             (SELECT array_agg(DISTINCT gp.platform_id ORDER BY gp.platform_id) \
              FROM game_platforms AS gp WHERE gp.game_id = game.id) AS platform_ids, \
             (SELECT COUNT(*) FROM owned WHERE owned.game_id = game.id) AS number_of_owners, \
             (SELECT COUNT(*) FROM wishlist WHERE wishlist.game_id = game.id) AS number_of_wishlists \
             FROM game \
             JOIN users AS creator ON creator.id = game.creator_id \
             LEFT JOIN game_review ON game_review.game_id = game.id \
             WHERE game.id = $1 \
             GROUP BY game.id, creator.id",
        )
        .bind(game_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GameDetailRow::into_detail))
    }

    async fn find_by_title(&self, title: &str) -> GameResult<Option<Game>> {
        let row: Option<GameRow> = sqlx::query_as(&format!("{SELECT_GAME} WHERE title = $1"))
            .bind(title)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(GameRow::into_game))
    }

    async fn insert(&self, creator_id: UserId, new_game: &NewGame) -> GameResult<GameId> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO game (title, description, genre_id, price, creation_date, creator_id) \
             VALUES ($1, $2, $3, $4, NOW(), $5) RETURNING id",
        )
        .bind(&new_game.title)
        .bind(&new_game.description)
        .bind(new_game.genre_id.value())
        .bind(new_game.price)
        .bind(creator_id.value())
        .fetch_one(&mut *tx)
        .await?;

        let platform_ids: Vec<i64> = new_game.platform_ids.iter().map(|p| p.value()).collect();
        sqlx::query(
            "INSERT INTO game_platforms (game_id, platform_id) SELECT $1, unnest($2::bigint[])",
        )
        .bind(id)
        .bind(&platform_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(GameId::from_i64(id))
    }

    async fn update(&self, game_id: GameId, update: &GameUpdate) -> GameResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE game SET title = $2, description = $3, genre_id = $4, price = $5 \
             WHERE id = $1",
        )
        .bind(game_id.value())
        .bind(&update.title)
        .bind(&update.description)
        .bind(update.genre_id.value())
        .bind(update.price)
        .execute(&mut *tx)
        .await?;

        if let Some(platform_ids) = &update.platform_ids {
            sqlx::query("DELETE FROM game_platforms WHERE game_id = $1")
                .bind(game_id.value())
                .execute(&mut *tx)
                .await?;

            let platform_ids: Vec<i64> = platform_ids.iter().map(|p| p.value()).collect();
            sqlx::query(
                "INSERT INTO game_platforms (game_id, platform_id) \
                 SELECT $1, unnest($2::bigint[])",
            )
            .bind(game_id.value())
            .bind(&platform_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, game_id: GameId) -> GameResult<()> {
        let mut tx = self.pool.begin().await?;

        for table in ["game_platforms", "wishlist", "owned"] {
            sqlx::query(&format!("DELETE FROM {table} WHERE game_id = $1"))
                .bind(game_id.value())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("DELETE FROM game WHERE id = $1")
            .bind(game_id.value())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn set_image_filename(&self, game_id: GameId, filename: &str) -> GameResult<()> {
        sqlx::query("UPDATE game SET image_filename = $2 WHERE id = $1")
            .bind(game_id.value())
            .bind(filename)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl ReviewRepository for PgGameRepository {
    async fn reviews_for_game(&self, game_id: GameId) -> GameResult<Vec<Review>> {
        let rows: Vec<ReviewRow> = sqlx::query_as(
            "SELECT game_review.user_id, users.first_name, users.last_name, \
             game_review.rating, game_review.review, game_review.timestamp \
             FROM game_review \
             JOIN users ON users.id = game_review.user_id \
             WHERE game_review.game_id = $1 \
             ORDER BY game_review.timestamp DESC",
        )
        .bind(game_id.value())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ReviewRow::into_review).collect())
    }

    async fn review_exists(&self, user_id: UserId, game_id: GameId) -> GameResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM game_review WHERE user_id = $1 AND game_id = $2)",
        )
        .bind(user_id.value())
        .bind(game_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn game_has_reviews(&self, game_id: GameId) -> GameResult<bool> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM game_review WHERE game_id = $1)")
                .bind(game_id.value())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn insert_review(
        &self,
        user_id: UserId,
        game_id: GameId,
        rating: i32,
        review: Option<&str>,
    ) -> GameResult<()> {
        sqlx::query(
            "INSERT INTO game_review (game_id, user_id, rating, review, timestamp) \
             VALUES ($1, $2, $3, $4, NOW())",
        )
        .bind(game_id.value())
        .bind(user_id.value())
        .bind(rating)
        .bind(review)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl ActionRepository for PgGameRepository {
    async fn is_wishlisted(&self, user_id: UserId, game_id: GameId) -> GameResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM wishlist WHERE user_id = $1 AND game_id = $2)",
        )
        .bind(user_id.value())
        .bind(game_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn add_to_wishlist(&self, user_id: UserId, game_id: GameId) -> GameResult<()> {
        sqlx::query("INSERT INTO wishlist (user_id, game_id) VALUES ($1, $2)")
            .bind(user_id.value())
            .bind(game_id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn remove_from_wishlist(&self, user_id: UserId, game_id: GameId) -> GameResult<()> {
        sqlx::query("DELETE FROM wishlist WHERE user_id = $1 AND game_id = $2")
            .bind(user_id.value())
            .bind(game_id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn is_owned(&self, user_id: UserId, game_id: GameId) -> GameResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM owned WHERE user_id = $1 AND game_id = $2)",
        )
        .bind(user_id.value())
        .bind(game_id.value())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn add_to_owned(&self, user_id: UserId, game_id: GameId) -> GameResult<()> {
        sqlx::query("INSERT INTO owned (user_id, game_id) VALUES ($1, $2)")
            .bind(user_id.value())
            .bind(game_id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn remove_from_owned(&self, user_id: UserId, game_id: GameId) -> GameResult<()> {
        sqlx::query("DELETE FROM owned WHERE user_id = $1 AND game_id = $2")
            .bind(user_id.value())
            .bind(game_id.value())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
