//! User Routes

use axum::Router;
use axum::routing::{get, post};

use crate::presentation::handlers::{
    self, UsersState, delete_user_image, get_user_image, set_user_image,
};

/// Build the `/users` route tree
pub fn users_router(state: UsersState) -> Router {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/{id}", get(handlers::view_user).patch(handlers::update_user))
        .route(
            "/{id}/image",
            get(get_user_image).put(set_user_image).delete(delete_user_image),
        )
        .with_state(state)
}
