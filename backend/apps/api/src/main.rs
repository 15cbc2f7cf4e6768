//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; application-level errors go
//! through `kernel::error::AppError`.

use axum::{
    Router, http,
    http::{Method, header},
};
use games::{PgGameRepository, games_router, presentation::handlers::GamesState};
use platform::storage::ImageStore;
use platform::token::AUTH_HEADER;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use users::{PgUserRepository, UsersConfig, presentation::handlers::UsersState, users_router};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Default listen port
const DEFAULT_PORT: u16 = 4941;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,users=info,games=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Image store
    let image_directory =
        env::var("IMAGE_DIRECTORY").unwrap_or_else(|_| "storage/images".to_string());
    let images = ImageStore::new(&image_directory);
    images.ensure_dir().await?;

    tracing::info!(directory = %image_directory, "Image store ready");

    // Optional password pepper
    let pepper = env::var("PASSWORD_PEPPER").ok().map(String::into_bytes);
    let users_config = UsersConfig::new(pepper);

    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let users_state = UsersState {
        repository: user_repository.clone(),
        config: Arc::new(users_config),
        images: images.clone(),
    };
    let games_state = GamesState::new(
        PgGameRepository::new(pool.clone()),
        user_repository,
        images,
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:4942,http://127.0.0.1:4942".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let auth_header: header::HeaderName = AUTH_HEADER.parse()?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            auth_header.clone(),
        ]))
        .expose_headers([auth_header])
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/v1/users", users_router(users_state))
        .nest("/api/v1/games", games_router(games_state))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
