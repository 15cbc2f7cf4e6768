pub mod actions;
pub mod create_game;
pub mod delete_game;
pub mod edit_game;
pub mod game_image;
pub mod get_game;
pub mod list_games;
pub mod reference;
pub mod reviews;
pub mod validation;

#[cfg(test)]
mod tests;
