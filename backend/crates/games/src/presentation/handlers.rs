//! Game HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum_extra::extract::{Query, WithRejection};
use kernel::id::{GameId, GenreId, PlatformId, UserId};
use platform::storage::ImageStore;
use users::PgUserRepository;
use users::presentation::auth::{authenticate, maybe_authenticate};

use crate::application::actions::ActionsUseCase;
use crate::application::create_game::{CreateGameInput, CreateGameUseCase};
use crate::application::delete_game::DeleteGameUseCase;
use crate::application::edit_game::{EditGameInput, EditGameUseCase};
use crate::application::game_image::{GameImageUseCase, ImageSetOutcome};
use crate::application::get_game::GetGameUseCase;
use crate::application::list_games::{ListGamesInput, ListGamesUseCase};
use crate::application::reference::ReferenceDataUseCase;
use crate::application::reviews::ReviewsUseCase;
use crate::domain::query::GameSort;
use crate::error::GameResult;
use crate::infra::postgres::PgGameRepository;
use crate::presentation::dto::{
    CreateGameRequest, CreateGameResponse, CreateReviewRequest, EditGameRequest, GameDetailDto,
    GameListQuery, GameListResponse, GenreDto, PlatformDto, ReviewDto,
};

/// Shared state for game routes
#[derive(Clone)]
pub struct GamesState {
    pub games: Arc<PgGameRepository>,
    pub users: Arc<PgUserRepository>,
    pub images: ImageStore,
}

impl GamesState {
    pub fn new(games: PgGameRepository, users: Arc<PgUserRepository>, images: ImageStore) -> Self {
        Self {
            games: Arc::new(games),
            users,
            images,
        }
    }
}

/// GET /games
pub async fn list_games(
    State(state): State<GamesState>,
    headers: HeaderMap,
    Query(query): Query<GameListQuery>,
) -> GameResult<Json<GameListResponse>> {
    let caller = maybe_authenticate(state.users.as_ref(), &headers)
        .await?
        .map(|user| user.user_id);

    let input = ListGamesInput {
        start_index: query.start_index.map(|n| n as usize),
        count: query.count.map(|n| n as usize),
        q: query.q,
        genre_ids: query.genre_ids.into_iter().map(GenreId::from_i64).collect(),
        platform_ids: query
            .platform_ids
            .into_iter()
            .map(PlatformId::from_i64)
            .collect(),
        max_price: query.price,
        creator_id: query.creator_id.map(UserId::from_i64),
        reviewer_id: query.reviewer_id.map(UserId::from_i64),
        sort: query.sort_by.unwrap_or(GameSort::CreatedAsc),
        owned_by_me: query.owned_by_me.unwrap_or(false),
        wishlisted_by_me: query.wishlisted_by_me.unwrap_or(false),
    };

    let output = ListGamesUseCase::new(state.games.clone())
        .execute(caller, input)
        .await?;

    Ok(Json(GameListResponse {
        games: output.games.into_iter().map(Into::into).collect(),
        count: output.count,
    }))
}

/// GET /games/{id}
pub async fn get_game(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
) -> GameResult<Json<GameDetailDto>> {
    let detail = GetGameUseCase::new(state.games.clone())
        .execute(GameId::from_i64(id))
        .await?;

    Ok(Json(detail.into()))
}

/// POST /games
pub async fn create_game(
    State(state): State<GamesState>,
    headers: HeaderMap,
    WithRejection(Json(request), _): WithRejection<Json<CreateGameRequest>, crate::GameError>,
) -> GameResult<impl IntoResponse> {
    let caller = authenticate(state.users.as_ref(), &headers).await?;

    let game_id = CreateGameUseCase::new(state.games.clone())
        .execute(
            caller.user_id,
            CreateGameInput {
                title: request.title,
                description: request.description,
                genre_id: GenreId::from_i64(request.genre_id),
                price: request.price,
                platform_ids: request
                    .platform_ids
                    .into_iter()
                    .map(PlatformId::from_i64)
                    .collect(),
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateGameResponse {
            game_id: game_id.value(),
        }),
    ))
}

/// PATCH /games/{id}
pub async fn edit_game(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    WithRejection(Json(request), _): WithRejection<Json<EditGameRequest>, crate::GameError>,
) -> GameResult<StatusCode> {
    let caller = authenticate(state.users.as_ref(), &headers).await?;

    EditGameUseCase::new(state.games.clone())
        .execute(
            GameId::from_i64(id),
            caller.user_id,
            EditGameInput {
                title: request.title,
                description: request.description,
                genre_id: request.genre_id.map(GenreId::from_i64),
                price: request.price,
                platform_ids: request
                    .platform_ids
                    .map(|ids| ids.into_iter().map(PlatformId::from_i64).collect()),
            },
        )
        .await?;

    Ok(StatusCode::OK)
}

/// DELETE /games/{id}
pub async fn delete_game(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> GameResult<StatusCode> {
    let caller = authenticate(state.users.as_ref(), &headers).await?;

    DeleteGameUseCase::new(state.games.clone(), state.games.clone())
        .execute(GameId::from_i64(id), caller.user_id)
        .await?;

    Ok(StatusCode::OK)
}

/// GET /games/genres
pub async fn list_genres(State(state): State<GamesState>) -> GameResult<Json<Vec<GenreDto>>> {
    let genres = ReferenceDataUseCase::new(state.games.clone()).genres().await?;
    Ok(Json(genres.into_iter().map(Into::into).collect()))
}

/// GET /games/platforms
pub async fn list_platforms(
    State(state): State<GamesState>,
) -> GameResult<Json<Vec<PlatformDto>>> {
    let platforms = ReferenceDataUseCase::new(state.games.clone())
        .platforms()
        .await?;
    Ok(Json(platforms.into_iter().map(Into::into).collect()))
}

/// GET /games/{id}/reviews
pub async fn list_reviews(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
) -> GameResult<Json<Vec<ReviewDto>>> {
    let reviews = ReviewsUseCase::new(state.games.clone(), state.games.clone())
        .list(GameId::from_i64(id))
        .await?;

    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// POST /games/{id}/reviews
pub async fn create_review(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    WithRejection(Json(request), _): WithRejection<Json<CreateReviewRequest>, crate::GameError>,
) -> GameResult<StatusCode> {
    let caller = authenticate(state.users.as_ref(), &headers).await?;

    ReviewsUseCase::new(state.games.clone(), state.games.clone())
        .submit(
            caller.user_id,
            GameId::from_i64(id),
            request.rating,
            request.review.as_deref(),
        )
        .await?;

    Ok(StatusCode::CREATED)
}

/// POST /games/{id}/wishlist
pub async fn add_to_wishlist(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> GameResult<StatusCode> {
    let caller = authenticate(state.users.as_ref(), &headers).await?;

    ActionsUseCase::new(state.games.clone(), state.games.clone())
        .add_to_wishlist(caller.user_id, GameId::from_i64(id))
        .await?;

    Ok(StatusCode::OK)
}

/// DELETE /games/{id}/wishlist
pub async fn remove_from_wishlist(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> GameResult<StatusCode> {
    let caller = authenticate(state.users.as_ref(), &headers).await?;

    ActionsUseCase::new(state.games.clone(), state.games.clone())
        .remove_from_wishlist(caller.user_id, GameId::from_i64(id))
        .await?;

    Ok(StatusCode::OK)
}

/// POST /games/{id}/owned
pub async fn add_to_owned(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> GameResult<StatusCode> {
    let caller = authenticate(state.users.as_ref(), &headers).await?;

    ActionsUseCase::new(state.games.clone(), state.games.clone())
        .add_to_owned(caller.user_id, GameId::from_i64(id))
        .await?;

    Ok(StatusCode::OK)
}

/// DELETE /games/{id}/owned
pub async fn remove_from_owned(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> GameResult<StatusCode> {
    let caller = authenticate(state.users.as_ref(), &headers).await?;

    ActionsUseCase::new(state.games.clone(), state.games.clone())
        .remove_from_owned(caller.user_id, GameId::from_i64(id))
        .await?;

    Ok(StatusCode::OK)
}

/// GET /games/{id}/image
pub async fn get_game_image(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
) -> GameResult<impl IntoResponse> {
    let (bytes, image_type) = GameImageUseCase::new(state.games.clone(), state.images.clone())
        .get(GameId::from_i64(id))
        .await?;

    Ok(([(header::CONTENT_TYPE, image_type.mime())], bytes))
}

/// PUT /games/{id}/image
pub async fn set_game_image(
    State(state): State<GamesState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> GameResult<StatusCode> {
    let caller = authenticate(state.users.as_ref(), &headers).await?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let outcome = GameImageUseCase::new(state.games.clone(), state.images.clone())
        .set(caller.user_id, GameId::from_i64(id), content_type, &body)
        .await?;

    Ok(match outcome {
        ImageSetOutcome::Created => StatusCode::CREATED,
        ImageSetOutcome::Replaced => StatusCode::OK,
    })
}
