pub mod game;
pub mod reference;
pub mod review;

pub use game::{Game, GameDetail, GameSummary, GameUpdate, NewGame};
pub use reference::{Genre, Platform};
pub use review::Review;
