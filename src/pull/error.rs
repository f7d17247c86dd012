use crate::common::Float;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeightError {
    #[error("there is nothing to pull")]
    Empty,
    #[error("candidate {index} has a negative weight ({weight})")]
    Negative { index: usize, weight: Float },
    #[error("candidate {index} has a weight that is not a number")]
    NotANumber { index: usize },
    #[error("candidate {index} has an infinite weight")]
    Infinite { index: usize },
    #[error("weights add up to more than can be represented")]
    TotalOverflow,
    #[error("at least one candidate needs a positive weight")]
    NoPositiveWeight,
}
