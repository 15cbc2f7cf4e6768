//! Use case tests over in-memory repositories

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use kernel::id::{GameId, GenreId, PlatformId, UserId};

use crate::application::actions::ActionsUseCase;
use crate::application::create_game::{CreateGameInput, CreateGameUseCase};
use crate::application::delete_game::DeleteGameUseCase;
use crate::application::edit_game::{EditGameInput, EditGameUseCase};
use crate::application::list_games::{ListGamesInput, ListGamesUseCase};
use crate::application::reviews::ReviewsUseCase;
use crate::domain::entity::{
    Game, GameDetail, GameSummary, GameUpdate, Genre, NewGame, Platform, Review,
};
use crate::domain::query::GameFilter;
use crate::domain::repository::{ActionRepository, GameRepository, ReviewRepository};
use crate::error::{GameError, GameResult};

struct StoredGame {
    game: Game,
    platform_ids: Vec<PlatformId>,
}

struct StoredReview {
    game_id: i64,
    user_id: i64,
    rating: i32,
    review: Option<String>,
    timestamp: DateTime<Utc>,
}

/// In-memory stand-in for the PostgreSQL repositories.
///
/// Search honors the membership and creator filters the tests exercise;
/// SQL clause assembly has its own tests next to the query builder.
struct InMemoryCatalogue {
    genres: Vec<Genre>,
    platforms: Vec<Platform>,
    games: Mutex<HashMap<i64, StoredGame>>,
    reviews: Mutex<Vec<StoredReview>>,
    wishlist: Mutex<HashSet<(i64, i64)>>,
    owned: Mutex<HashSet<(i64, i64)>>,
    next_id: Mutex<i64>,
}

impl Default for InMemoryCatalogue {
    fn default() -> Self {
        let genres = (1..=3)
            .map(|id| Genre {
                genre_id: GenreId::from_i64(id),
                name: format!("Genre {id}"),
            })
            .collect();
        let platforms = (1..=3)
            .map(|id| Platform {
                platform_id: PlatformId::from_i64(id),
                name: format!("Platform {id}"),
            })
            .collect();
        Self {
            genres,
            platforms,
            games: Mutex::default(),
            reviews: Mutex::default(),
            wishlist: Mutex::default(),
            owned: Mutex::default(),
            next_id: Mutex::new(0),
        }
    }
}

impl InMemoryCatalogue {
    fn summary_of(&self, stored: &StoredGame) -> GameSummary {
        let ratings: Vec<i32> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.game_id == stored.game.game_id.value())
            .map(|r| r.rating)
            .collect();
        let rating = if ratings.is_empty() {
            0.0
        } else {
            ratings.iter().sum::<i32>() as f64 / ratings.len() as f64
        };
        GameSummary {
            game_id: stored.game.game_id,
            title: stored.game.title.clone(),
            genre_id: stored.game.genre_id,
            creation_date: stored.game.creation_date,
            creator_id: stored.game.creator_id,
            price: stored.game.price,
            creator_first_name: "Creator".to_string(),
            creator_last_name: "Person".to_string(),
            rating,
            platform_ids: stored.platform_ids.clone(),
        }
    }
}

impl GameRepository for InMemoryCatalogue {
    async fn genres(&self) -> GameResult<Vec<Genre>> {
        Ok(self.genres.clone())
    }

    async fn platforms(&self) -> GameResult<Vec<Platform>> {
        Ok(self.platforms.clone())
    }

    async fn all_genres_exist(&self, ids: &[GenreId]) -> GameResult<bool> {
        Ok(ids
            .iter()
            .all(|id| self.genres.iter().any(|g| g.genre_id == *id)))
    }

    async fn all_platforms_exist(&self, ids: &[PlatformId]) -> GameResult<bool> {
        Ok(ids
            .iter()
            .all(|id| self.platforms.iter().any(|p| p.platform_id == *id)))
    }

    async fn search(&self, filter: &GameFilter) -> GameResult<Vec<GameSummary>> {
        let games = self.games.lock().unwrap();
        let mut ids: Vec<i64> = games.keys().copied().collect();
        ids.sort();

        let mut results = Vec::new();
        for id in ids {
            let stored = &games[&id];
            if let Some(creator) = filter.creator_id {
                if stored.game.creator_id != creator {
                    continue;
                }
            }
            if let Some(owner) = filter.owned_by {
                if !self.owned.lock().unwrap().contains(&(owner.value(), id)) {
                    continue;
                }
            }
            if let Some(wisher) = filter.wishlisted_by {
                if !self.wishlist.lock().unwrap().contains(&(wisher.value(), id)) {
                    continue;
                }
            }
            results.push(self.summary_of(stored));
        }
        Ok(results)
    }

    async fn find_by_id(&self, game_id: GameId) -> GameResult<Option<Game>> {
        Ok(self
            .games
            .lock()
            .unwrap()
            .get(&game_id.value())
            .map(|stored| stored.game.clone()))
    }

    async fn find_detail(&self, game_id: GameId) -> GameResult<Option<GameDetail>> {
        let games = self.games.lock().unwrap();
        let Some(stored) = games.get(&game_id.value()) else {
            return Ok(None);
        };
        let owners = self
            .owned
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, g)| *g == game_id.value())
            .count() as i64;
        let wishes = self
            .wishlist
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, g)| *g == game_id.value())
            .count() as i64;
        Ok(Some(GameDetail {
            summary: self.summary_of(stored),
            description: stored.game.description.clone(),
            number_of_owners: owners,
            number_of_wishlists: wishes,
        }))
    }

    async fn find_by_title(&self, title: &str) -> GameResult<Option<Game>> {
        Ok(self
            .games
            .lock()
            .unwrap()
            .values()
            .find(|stored| stored.game.title == title)
            .map(|stored| stored.game.clone()))
    }

    async fn insert(&self, creator_id: UserId, new_game: &NewGame) -> GameResult<GameId> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let id = *next_id;
        self.games.lock().unwrap().insert(
            id,
            StoredGame {
                game: Game {
                    game_id: GameId::from_i64(id),
                    title: new_game.title.clone(),
                    description: new_game.description.clone(),
                    genre_id: new_game.genre_id,
                    price: new_game.price,
                    creation_date: Utc::now(),
                    creator_id,
                    image_filename: None,
                },
                platform_ids: new_game.platform_ids.clone(),
            },
        );
        Ok(GameId::from_i64(id))
    }

    async fn update(&self, game_id: GameId, update: &GameUpdate) -> GameResult<()> {
        if let Some(stored) = self.games.lock().unwrap().get_mut(&game_id.value()) {
            stored.game.title = update.title.clone();
            stored.game.description = update.description.clone();
            stored.game.genre_id = update.genre_id;
            stored.game.price = update.price;
            if let Some(platform_ids) = &update.platform_ids {
                stored.platform_ids = platform_ids.clone();
            }
        }
        Ok(())
    }

    async fn delete(&self, game_id: GameId) -> GameResult<()> {
        let id = game_id.value();
        self.games.lock().unwrap().remove(&id);
        self.wishlist.lock().unwrap().retain(|(_, g)| *g != id);
        self.owned.lock().unwrap().retain(|(_, g)| *g != id);
        Ok(())
    }

    async fn set_image_filename(&self, game_id: GameId, filename: &str) -> GameResult<()> {
        if let Some(stored) = self.games.lock().unwrap().get_mut(&game_id.value()) {
            stored.game.image_filename = Some(filename.to_string());
        }
        Ok(())
    }
}

impl ReviewRepository for InMemoryCatalogue {
    async fn reviews_for_game(&self, game_id: GameId) -> GameResult<Vec<Review>> {
        let mut rows: Vec<Review> = self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.game_id == game_id.value())
            .map(|r| Review {
                reviewer_id: UserId::from_i64(r.user_id),
                reviewer_first_name: "Reviewer".to_string(),
                reviewer_last_name: "Person".to_string(),
                rating: r.rating,
                review: r.review.clone(),
                timestamp: r.timestamp,
            })
            .collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(rows)
    }

    async fn review_exists(&self, user_id: UserId, game_id: GameId) -> GameResult<bool> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.user_id == user_id.value() && r.game_id == game_id.value()))
    }

    async fn game_has_reviews(&self, game_id: GameId) -> GameResult<bool> {
        Ok(self
            .reviews
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.game_id == game_id.value()))
    }

    async fn insert_review(
        &self,
        user_id: UserId,
        game_id: GameId,
        rating: i32,
        review: Option<&str>,
    ) -> GameResult<()> {
        self.reviews.lock().unwrap().push(StoredReview {
            game_id: game_id.value(),
            user_id: user_id.value(),
            rating,
            review: review.map(str::to_string),
            timestamp: Utc::now(),
        });
        Ok(())
    }
}

impl ActionRepository for InMemoryCatalogue {
    async fn is_wishlisted(&self, user_id: UserId, game_id: GameId) -> GameResult<bool> {
        Ok(self
            .wishlist
            .lock()
            .unwrap()
            .contains(&(user_id.value(), game_id.value())))
    }

    async fn add_to_wishlist(&self, user_id: UserId, game_id: GameId) -> GameResult<()> {
        self.wishlist
            .lock()
            .unwrap()
            .insert((user_id.value(), game_id.value()));
        Ok(())
    }

    async fn remove_from_wishlist(&self, user_id: UserId, game_id: GameId) -> GameResult<()> {
        self.wishlist
            .lock()
            .unwrap()
            .remove(&(user_id.value(), game_id.value()));
        Ok(())
    }

    async fn is_owned(&self, user_id: UserId, game_id: GameId) -> GameResult<bool> {
        Ok(self
            .owned
            .lock()
            .unwrap()
            .contains(&(user_id.value(), game_id.value())))
    }

    async fn add_to_owned(&self, user_id: UserId, game_id: GameId) -> GameResult<()> {
        self.owned
            .lock()
            .unwrap()
            .insert((user_id.value(), game_id.value()));
        Ok(())
    }

    async fn remove_from_owned(&self, user_id: UserId, game_id: GameId) -> GameResult<()> {
        self.owned
            .lock()
            .unwrap()
            .remove(&(user_id.value(), game_id.value()));
        Ok(())
    }
}

const CREATOR: UserId = UserId::from_i64(1);
const OTHER: UserId = UserId::from_i64(2);

fn create_input(title: &str) -> CreateGameInput {
    CreateGameInput {
        title: title.to_string(),
        description: "A game".to_string(),
        genre_id: GenreId::from_i64(1),
        price: 1999,
        platform_ids: vec![PlatformId::from_i64(1)],
    }
}

async fn seed_game(repo: &Arc<InMemoryCatalogue>, title: &str) -> GameId {
    CreateGameUseCase::new(repo.clone())
        .execute(CREATOR, create_input(title))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_create_game_rules() {
    let repo = Arc::new(InMemoryCatalogue::default());
    let use_case = CreateGameUseCase::new(repo.clone());

    let game_id = use_case.execute(CREATOR, create_input("Portal")).await.unwrap();
    assert_eq!(repo.find_by_id(game_id).await.unwrap().unwrap().title, "Portal");

    // Duplicate title
    assert!(matches!(
        use_case.execute(OTHER, create_input("Portal")).await,
        Err(GameError::TitleTaken)
    ));

    // Unknown genre
    let mut input = create_input("Portal 2");
    input.genre_id = GenreId::from_i64(99);
    assert!(matches!(
        use_case.execute(CREATOR, input).await,
        Err(GameError::Validation(_))
    ));

    // No platforms
    let mut input = create_input("Portal 2");
    input.platform_ids.clear();
    assert!(matches!(
        use_case.execute(CREATOR, input).await,
        Err(GameError::Validation(_))
    ));
}

#[tokio::test]
async fn test_edit_game_rules() {
    let repo = Arc::new(InMemoryCatalogue::default());
    let portal = seed_game(&repo, "Portal").await;
    seed_game(&repo, "Half-Life").await;
    let use_case = EditGameUseCase::new(repo.clone());

    // Only the creator may edit
    assert!(matches!(
        use_case.execute(portal, OTHER, EditGameInput::default()).await,
        Err(GameError::NotCreator)
    ));

    // Another game's title is blocked
    let result = use_case
        .execute(
            portal,
            CREATOR,
            EditGameInput {
                title: Some("Half-Life".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(GameError::TitleTaken)));

    // Resubmitting the game's own title is fine, and absent fields are kept
    use_case
        .execute(
            portal,
            CREATOR,
            EditGameInput {
                title: Some("Portal".to_string()),
                price: Some(999),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let game = repo.find_by_id(portal).await.unwrap().unwrap();
    assert_eq!(game.title, "Portal");
    assert_eq!(game.price, 999);
    assert_eq!(game.description, "A game");
}

#[tokio::test]
async fn test_edit_unknown_game() {
    let repo = Arc::new(InMemoryCatalogue::default());
    let result = EditGameUseCase::new(repo.clone())
        .execute(GameId::from_i64(42), CREATOR, EditGameInput::default())
        .await;
    assert!(matches!(result, Err(GameError::NotFound)));
}

#[tokio::test]
async fn test_delete_game_rules() {
    let repo = Arc::new(InMemoryCatalogue::default());
    let portal = seed_game(&repo, "Portal").await;
    let use_case = DeleteGameUseCase::new(repo.clone(), repo.clone());

    assert!(matches!(
        use_case.execute(portal, OTHER).await,
        Err(GameError::NotCreator)
    ));

    // Reviews block deletion
    repo.insert_review(OTHER, portal, 8, None).await.unwrap();
    assert!(matches!(
        use_case.execute(portal, CREATOR).await,
        Err(GameError::HasReviews)
    ));

    let fresh = seed_game(&repo, "Half-Life").await;
    use_case.execute(fresh, CREATOR).await.unwrap();
    assert!(repo.find_by_id(fresh).await.unwrap().is_none());
}

#[tokio::test]
async fn test_review_rules() {
    let repo = Arc::new(InMemoryCatalogue::default());
    let portal = seed_game(&repo, "Portal").await;
    let use_case = ReviewsUseCase::new(repo.clone(), repo.clone());

    // Rating bounds
    assert!(matches!(
        use_case.submit(OTHER, portal, 0, None).await,
        Err(GameError::Validation(_))
    ));
    assert!(matches!(
        use_case.submit(OTHER, portal, 11, None).await,
        Err(GameError::Validation(_))
    ));

    // Unknown game
    assert!(matches!(
        use_case.submit(OTHER, GameId::from_i64(42), 8, None).await,
        Err(GameError::NotFound)
    ));

    // Creators cannot review their own game
    assert!(matches!(
        use_case.submit(CREATOR, portal, 8, None).await,
        Err(GameError::OwnReview)
    ));

    use_case.submit(OTHER, portal, 8, Some("Great")).await.unwrap();

    // One review per user per game
    assert!(matches!(
        use_case.submit(OTHER, portal, 9, None).await,
        Err(GameError::AlreadyReviewed)
    ));

    let reviews = use_case.list(portal).await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].rating, 8);
    assert_eq!(reviews[0].review.as_deref(), Some("Great"));
}

#[tokio::test]
async fn test_wishlist_rules() {
    let repo = Arc::new(InMemoryCatalogue::default());
    let portal = seed_game(&repo, "Portal").await;
    let use_case = ActionsUseCase::new(repo.clone(), repo.clone());

    // Not your own game
    assert!(matches!(
        use_case.add_to_wishlist(CREATOR, portal).await,
        Err(GameError::OwnGameAction)
    ));

    use_case.add_to_wishlist(OTHER, portal).await.unwrap();
    assert!(matches!(
        use_case.add_to_wishlist(OTHER, portal).await,
        Err(GameError::AlreadyWishlisted)
    ));

    use_case.remove_from_wishlist(OTHER, portal).await.unwrap();
    assert!(matches!(
        use_case.remove_from_wishlist(OTHER, portal).await,
        Err(GameError::NotWishlisted)
    ));

    // An owned game cannot be wishlisted
    use_case.add_to_owned(OTHER, portal).await.unwrap();
    assert!(matches!(
        use_case.add_to_wishlist(OTHER, portal).await,
        Err(GameError::WishlistOwnedGame)
    ));
}

#[tokio::test]
async fn test_owning_supersedes_wishing() {
    let repo = Arc::new(InMemoryCatalogue::default());
    let portal = seed_game(&repo, "Portal").await;
    let use_case = ActionsUseCase::new(repo.clone(), repo.clone());

    use_case.add_to_wishlist(OTHER, portal).await.unwrap();
    use_case.add_to_owned(OTHER, portal).await.unwrap();

    // The wishlist entry is silently dropped
    assert!(!repo.is_wishlisted(OTHER, portal).await.unwrap());
    assert!(repo.is_owned(OTHER, portal).await.unwrap());

    assert!(matches!(
        use_case.add_to_owned(OTHER, portal).await,
        Err(GameError::AlreadyOwned)
    ));

    use_case.remove_from_owned(OTHER, portal).await.unwrap();
    assert!(matches!(
        use_case.remove_from_owned(OTHER, portal).await,
        Err(GameError::NotOwned)
    ));
}

#[tokio::test]
async fn test_list_games_membership_filters_require_auth() {
    let repo = Arc::new(InMemoryCatalogue::default());
    let use_case = ListGamesUseCase::new(repo.clone());

    let result = use_case
        .execute(
            None,
            ListGamesInput {
                owned_by_me: true,
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(GameError::Unauthorized)));

    let result = use_case
        .execute(
            None,
            ListGamesInput {
                wishlisted_by_me: true,
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(GameError::Unauthorized)));
}

#[tokio::test]
async fn test_list_games_rejects_unknown_reference_ids() {
    let repo = Arc::new(InMemoryCatalogue::default());
    let use_case = ListGamesUseCase::new(repo.clone());

    let result = use_case
        .execute(
            None,
            ListGamesInput {
                genre_ids: vec![GenreId::from_i64(99)],
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(GameError::Validation(_))));

    let result = use_case
        .execute(
            None,
            ListGamesInput {
                platform_ids: vec![PlatformId::from_i64(99)],
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(GameError::Validation(_))));
}

#[tokio::test]
async fn test_list_games_paginates_after_counting() {
    let repo = Arc::new(InMemoryCatalogue::default());
    for i in 0..5 {
        seed_game(&repo, &format!("Game {i}")).await;
    }

    let output = ListGamesUseCase::new(repo.clone())
        .execute(
            None,
            ListGamesInput {
                start_index: Some(1),
                count: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // The page is sliced but the count is the full match total
    assert_eq!(output.games.len(), 2);
    assert_eq!(output.count, 5);
    assert_eq!(output.games[0].title, "Game 1");
}

#[tokio::test]
async fn test_list_games_owned_by_me() {
    let repo = Arc::new(InMemoryCatalogue::default());
    let portal = seed_game(&repo, "Portal").await;
    seed_game(&repo, "Half-Life").await;
    repo.add_to_owned(OTHER, portal).await.unwrap();

    let output = ListGamesUseCase::new(repo.clone())
        .execute(
            Some(OTHER),
            ListGamesInput {
                owned_by_me: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(output.count, 1);
    assert_eq!(output.games[0].title, "Portal");
}
