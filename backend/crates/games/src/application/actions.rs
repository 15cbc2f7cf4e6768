//! Wishlist and Owned Use Cases
//!
//! Each mutation re-checks current state immediately before writing.
//! The checks and the write are separate statements, so two racing
//! requests can both pass a check; the composite primary keys on the
//! link tables stop duplicate rows from landing.

use std::sync::Arc;

use kernel::id::{GameId, UserId};

use crate::domain::entity::Game;
use crate::domain::repository::{ActionRepository, GameRepository};
use crate::error::{GameError, GameResult};

/// Wishlist and ownership toggles
pub struct ActionsUseCase<G: GameRepository, A: ActionRepository> {
    games: Arc<G>,
    actions: Arc<A>,
}

impl<G: GameRepository, A: ActionRepository> ActionsUseCase<G, A> {
    pub fn new(games: Arc<G>, actions: Arc<A>) -> Self {
        Self { games, actions }
    }

    async fn load_game(&self, game_id: GameId) -> GameResult<Game> {
        self.games
            .find_by_id(game_id)
            .await?
            .ok_or(GameError::NotFound)
    }

    /// Add a game to the caller's wishlist.
    ///
    /// Rejected for the game's own creator, for games already owned,
    /// and for games already wishlisted.
    pub async fn add_to_wishlist(&self, caller_id: UserId, game_id: GameId) -> GameResult<()> {
        let game = self.load_game(game_id).await?;

        if game.is_created_by(caller_id) {
            return Err(GameError::OwnGameAction);
        }
        if self.actions.is_owned(caller_id, game_id).await? {
            return Err(GameError::WishlistOwnedGame);
        }
        if self.actions.is_wishlisted(caller_id, game_id).await? {
            return Err(GameError::AlreadyWishlisted);
        }

        self.actions.add_to_wishlist(caller_id, game_id).await?;

        tracing::info!(game_id = game_id.value(), user_id = caller_id.value(), "game wishlisted");

        Ok(())
    }

    /// Remove a game from the caller's wishlist
    pub async fn remove_from_wishlist(&self, caller_id: UserId, game_id: GameId) -> GameResult<()> {
        self.load_game(game_id).await?;

        if !self.actions.is_wishlisted(caller_id, game_id).await? {
            return Err(GameError::NotWishlisted);
        }

        self.actions.remove_from_wishlist(caller_id, game_id).await?;

        Ok(())
    }

    /// Mark a game as owned by the caller.
    ///
    /// Owning a wishlisted game silently drops the wishlist entry
    /// first; owning supersedes wishing.
    pub async fn add_to_owned(&self, caller_id: UserId, game_id: GameId) -> GameResult<()> {
        let game = self.load_game(game_id).await?;

        if game.is_created_by(caller_id) {
            return Err(GameError::OwnGameAction);
        }
        if self.actions.is_owned(caller_id, game_id).await? {
            return Err(GameError::AlreadyOwned);
        }

        if self.actions.is_wishlisted(caller_id, game_id).await? {
            self.actions.remove_from_wishlist(caller_id, game_id).await?;
        }

        self.actions.add_to_owned(caller_id, game_id).await?;

        tracing::info!(game_id = game_id.value(), user_id = caller_id.value(), "game marked owned");

        Ok(())
    }

    /// Remove the caller's ownership mark
    pub async fn remove_from_owned(&self, caller_id: UserId, game_id: GameId) -> GameResult<()> {
        self.load_game(game_id).await?;

        if !self.actions.is_owned(caller_id, game_id).await? {
            return Err(GameError::NotOwned);
        }

        self.actions.remove_from_owned(caller_id, game_id).await?;

        Ok(())
    }
}
