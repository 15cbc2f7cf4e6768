//! Reference Data Use Case

use std::sync::Arc;

use crate::domain::entity::{Genre, Platform};
use crate::domain::repository::GameRepository;
use crate::error::GameResult;

/// List the fixed genre and platform tables
pub struct ReferenceDataUseCase<G: GameRepository> {
    repository: Arc<G>,
}

impl<G: GameRepository> ReferenceDataUseCase<G> {
    pub fn new(repository: Arc<G>) -> Self {
        Self { repository }
    }

    pub async fn genres(&self) -> GameResult<Vec<Genre>> {
        self.repository.genres().await
    }

    pub async fn platforms(&self) -> GameResult<Vec<Platform>> {
        self.repository.platforms().await
    }
}
