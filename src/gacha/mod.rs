//! Items, banners and players, and the pull transaction that ties them to
//! the formula engine.

mod error;
mod game;
mod objects;

pub use error::GameError;
pub use game::{Game, Odds};
pub use objects::{Banner, Item, Player};
