use crate::common::Float;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("no item with id {0:?}")]
    UnknownItem(String),
    #[error("no banner with id {0:?}")]
    UnknownBanner(String),
    #[error("no player with id {0:?}")]
    UnknownPlayer(String),
    #[error("an item with id {0:?} already exists")]
    DuplicateItem(String),
    #[error("a banner with id {0:?} already exists")]
    DuplicateBanner(String),
    #[error("a player with id {0:?} already exists")]
    DuplicatePlayer(String),
    #[error("rarity must be a positive number, got {0}")]
    InvalidRarity(Float),
    #[error("amount must be a finite, non-negative number, got {0}")]
    InvalidAmount(Float),
    #[error("a banner needs at least one item")]
    EmptyBanner,
    #[error("player {player:?} has {money} but needs {cost}")]
    InsufficientFunds {
        player: String,
        money: Float,
        cost: Float,
    },
    #[error("cannot pull from banner {banner:?}: {source}")]
    Pull {
        banner: String,
        #[source]
        source: crate::Error,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
