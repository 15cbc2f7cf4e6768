//! List Games Use Case

use std::sync::Arc;

use kernel::id::{GenreId, PlatformId, UserId};

use crate::application::validation::validate_price;
use crate::domain::entity::GameSummary;
use crate::domain::query::{GameFilter, GameSort, paginate};
use crate::domain::repository::GameRepository;
use crate::error::{GameError, GameResult};

/// Search parameters, decoded but not yet validated
#[derive(Debug, Default)]
pub struct ListGamesInput {
    pub start_index: Option<usize>,
    pub count: Option<usize>,
    pub q: Option<String>,
    pub genre_ids: Vec<GenreId>,
    pub platform_ids: Vec<PlatformId>,
    pub max_price: Option<i32>,
    pub creator_id: Option<UserId>,
    pub reviewer_id: Option<UserId>,
    pub sort: GameSort,
    pub owned_by_me: bool,
    pub wishlisted_by_me: bool,
}

/// One page of search results plus the unpaginated total
#[derive(Debug)]
pub struct ListGamesOutput {
    pub games: Vec<GameSummary>,
    pub count: usize,
}

/// Search the catalogue
pub struct ListGamesUseCase<G: GameRepository> {
    repository: Arc<G>,
}

impl<G: GameRepository> ListGamesUseCase<G> {
    pub fn new(repository: Arc<G>) -> Self {
        Self { repository }
    }

    /// Run a search.
    ///
    /// `caller` is the authenticated user, if any; the owned-by-me and
    /// wishlisted-by-me filters require one. Unknown genre or platform
    /// ids reject the whole request rather than matching nothing.
    pub async fn execute(
        &self,
        caller: Option<UserId>,
        input: ListGamesInput,
    ) -> GameResult<ListGamesOutput> {
        if let Some(q) = &input.q {
            if q.is_empty() {
                return Err(GameError::Validation("q must not be empty".to_string()));
            }
        }
        if let Some(price) = input.max_price {
            validate_price(price)?;
        }

        if !input.genre_ids.is_empty() && !self.repository.all_genres_exist(&input.genre_ids).await?
        {
            return Err(GameError::Validation("unknown genreId".to_string()));
        }
        if !input.platform_ids.is_empty()
            && !self.repository.all_platforms_exist(&input.platform_ids).await?
        {
            return Err(GameError::Validation("unknown platformId".to_string()));
        }

        let owned_by = match (input.owned_by_me, caller) {
            (false, _) => None,
            (true, Some(user_id)) => Some(user_id),
            (true, None) => return Err(GameError::Unauthorized),
        };
        let wishlisted_by = match (input.wishlisted_by_me, caller) {
            (false, _) => None,
            (true, Some(user_id)) => Some(user_id),
            (true, None) => return Err(GameError::Unauthorized),
        };

        let filter = GameFilter {
            q: input.q,
            genre_ids: input.genre_ids,
            platform_ids: input.platform_ids,
            max_price: input.max_price,
            creator_id: input.creator_id,
            reviewer_id: input.reviewer_id,
            owned_by,
            wishlisted_by,
            sort: input.sort,
        };

        let rows = self.repository.search(&filter).await?;
        let (games, count) = paginate(rows, input.start_index, input.count);

        Ok(ListGamesOutput { games, count })
    }
}
