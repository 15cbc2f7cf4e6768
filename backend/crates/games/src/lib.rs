//! Games Backend Module
//!
//! Catalogue of games with reviews, wishlists, ownership marks, and
//! hero images.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, search query model, repository traits
//! - `application/` - Use cases (search, CRUD, reviews, actions, images)
//! - `infra/` - PostgreSQL repositories
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{GameError, GameResult};
pub use infra::postgres::PgGameRepository;
pub use presentation::router::games_router;
