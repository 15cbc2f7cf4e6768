//! Reference Data

use kernel::id::{GenreId, PlatformId};

/// A game genre
#[derive(Debug, Clone)]
pub struct Genre {
    pub genre_id: GenreId,
    pub name: String,
}

/// A platform a game can run on
#[derive(Debug, Clone)]
pub struct Platform {
    pub platform_id: PlatformId,
    pub name: String,
}
