//! Rarity-weighted pulls for gacha games.
//!
//! A banner's drop rates come from a KeyLang formula over the rarity `R` of
//! each item, such as `1 + 1 / R`. Formulas are compiled once into a
//! [Formula] and then evaluated for every pull.
//!
//! ```
//! use rust_gacha::{Formula, PullContext};
//!
//! let formula: Formula = "R ^ 2".parse().unwrap();
//! let rarities = [1.0, 2.0, 3.0];
//! let mut ctx = PullContext::seeded(17);
//! let pulled = ctx.pull(&formula, &rarities).unwrap();
//! assert!(rarities.contains(pulled));
//! ```

pub mod common;
mod error;
pub mod eval;
mod formula;
pub mod gacha;
pub mod parse;
pub mod pull;

#[cfg(test)]
mod proptests;

pub use error::{Error, Result};
pub use formula::Formula;
pub use pull::{Candidate, PullContext, Sampler, WeightTable};
