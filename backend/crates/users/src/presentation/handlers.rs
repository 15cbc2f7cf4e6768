//! User HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use kernel::id::UserId;
use platform::storage::ImageStore;

use crate::application::config::UsersConfig;
use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::logout::LogoutUseCase;
use crate::application::register::{RegisterInput, RegisterUseCase};
use crate::application::update_profile::{UpdateProfileInput, UpdateProfileUseCase};
use crate::application::user_image::{ImageSetOutcome, UserImageUseCase};
use crate::application::view_profile::ViewProfileUseCase;
use crate::error::UserResult;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::auth::{authenticate, maybe_authenticate};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UpdateUserRequest,
    UserResponse,
};

/// Shared state for user routes
#[derive(Clone)]
pub struct UsersState {
    pub repository: Arc<PgUserRepository>,
    pub config: Arc<UsersConfig>,
    pub images: ImageStore,
}

impl UsersState {
    pub fn new(repository: PgUserRepository, config: UsersConfig, images: ImageStore) -> Self {
        Self {
            repository: Arc::new(repository),
            config: Arc::new(config),
            images,
        }
    }
}

/// POST /users/register
pub async fn register(
    State(state): State<UsersState>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, crate::UserError>,
) -> UserResult<impl IntoResponse> {
    let use_case = RegisterUseCase::new(state.repository.clone(), state.config.clone());

    let user_id = use_case
        .execute(RegisterInput {
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            password: request.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user_id.value(),
        }),
    ))
}

/// POST /users/login
pub async fn login(
    State(state): State<UsersState>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, crate::UserError>,
) -> UserResult<Json<LoginResponse>> {
    let use_case = LoginUseCase::new(state.repository.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        user_id: output.user_id.value(),
        token: output.token,
    }))
}

/// POST /users/logout
pub async fn logout(
    State(state): State<UsersState>,
    headers: HeaderMap,
) -> UserResult<StatusCode> {
    let caller = authenticate(state.repository.as_ref(), &headers).await?;

    LogoutUseCase::new(state.repository.clone())
        .execute(&caller)
        .await?;

    Ok(StatusCode::OK)
}

/// GET /users/{id}
pub async fn view_user(
    State(state): State<UsersState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> UserResult<Json<UserResponse>> {
    let caller = maybe_authenticate(state.repository.as_ref(), &headers).await?;

    let profile = ViewProfileUseCase::new(state.repository.clone())
        .execute(UserId::from_i64(id), caller.as_ref())
        .await?;

    Ok(Json(UserResponse {
        first_name: profile.first_name,
        last_name: profile.last_name,
        email: profile.email,
    }))
}

/// PATCH /users/{id}
pub async fn update_user(
    State(state): State<UsersState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    WithRejection(Json(request), _): WithRejection<Json<UpdateUserRequest>, crate::UserError>,
) -> UserResult<StatusCode> {
    let caller = authenticate(state.repository.as_ref(), &headers).await?;

    UpdateProfileUseCase::new(state.repository.clone(), state.config.clone())
        .execute(
            UserId::from_i64(id),
            &caller,
            UpdateProfileInput {
                email: request.email,
                first_name: request.first_name,
                last_name: request.last_name,
                password: request.password,
                current_password: request.current_password,
            },
        )
        .await?;

    Ok(StatusCode::OK)
}

/// GET /users/{id}/image
pub async fn get_user_image(
    State(state): State<UsersState>,
    Path(id): Path<i64>,
) -> UserResult<impl IntoResponse> {
    let (bytes, image_type) = UserImageUseCase::new(state.repository.clone(), state.images.clone())
        .get(UserId::from_i64(id))
        .await?;

    Ok(([(header::CONTENT_TYPE, image_type.mime())], bytes))
}

/// PUT /users/{id}/image
pub async fn set_user_image(
    State(state): State<UsersState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> UserResult<StatusCode> {
    let caller = authenticate(state.repository.as_ref(), &headers).await?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let outcome = UserImageUseCase::new(state.repository.clone(), state.images.clone())
        .set(&caller, UserId::from_i64(id), content_type, &body)
        .await?;

    Ok(match outcome {
        ImageSetOutcome::Created => StatusCode::CREATED,
        ImageSetOutcome::Replaced => StatusCode::OK,
    })
}

/// DELETE /users/{id}/image
pub async fn delete_user_image(
    State(state): State<UsersState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> UserResult<StatusCode> {
    let caller = authenticate(state.repository.as_ref(), &headers).await?;

    UserImageUseCase::new(state.repository.clone(), state.images.clone())
        .delete(&caller, UserId::from_i64(id))
        .await?;

    Ok(StatusCode::OK)
}
