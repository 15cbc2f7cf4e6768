//! Game Routes
//!
//! `/genres` and `/platforms` are registered before the `/{id}` matcher
//! so the literal segments win.

use axum::Router;
use axum::routing::{get, post};

use crate::presentation::handlers::{self, GamesState};

/// Build the `/games` route tree
pub fn games_router(state: GamesState) -> Router {
    Router::new()
        .route("/", get(handlers::list_games).post(handlers::create_game))
        .route("/genres", get(handlers::list_genres))
        .route("/platforms", get(handlers::list_platforms))
        .route(
            "/{id}",
            get(handlers::get_game)
                .patch(handlers::edit_game)
                .delete(handlers::delete_game),
        )
        .route(
            "/{id}/reviews",
            get(handlers::list_reviews).post(handlers::create_review),
        )
        .route(
            "/{id}/wishlist",
            post(handlers::add_to_wishlist).delete(handlers::remove_from_wishlist),
        )
        .route(
            "/{id}/owned",
            post(handlers::add_to_owned).delete(handlers::remove_from_owned),
        )
        .route(
            "/{id}/image",
            get(handlers::get_game_image).put(handlers::set_game_image),
        )
        .with_state(state)
}
