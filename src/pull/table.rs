use super::{error::WeightError, sampler::Sampler};
use crate::common::*;
use crate::formula::Formula;

pub trait Candidate {
    fn rarity(&self) -> Rarity;
}

impl Candidate for Rarity {
    fn rarity(&self) -> Rarity {
        *self
    }
}

impl<T: Candidate + ?Sized> Candidate for &T {
    fn rarity(&self) -> Rarity {
        (**self).rarity()
    }
}

/// Every weight is finite and non-negative and their total is finite and
/// strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    weights: NonEmpty<Float>,
    total: Float,
}

impl WeightTable {
    pub fn compute<T: Candidate>(formula: &Formula, candidates: &[T]) -> crate::Result<Self> {
        let weights = candidates
            .iter()
            .map(|c| formula.eval(c.rarity()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_weights(weights)?)
    }

    pub fn from_weights(weights: Vec<Float>) -> Result<Self, WeightError> {
        let weights = NonEmpty::try_from_vec(weights).map_err(|_| WeightError::Empty)?;

        for (index, &weight) in weights.iter().enumerate() {
            if weight.is_nan() {
                return Err(WeightError::NotANumber { index });
            } else if weight < 0.0 {
                return Err(WeightError::Negative { index, weight });
            } else if weight.is_infinite() {
                return Err(WeightError::Infinite { index });
            }
        }

        let total: Float = weights.iter().sum();
        if total.is_infinite() {
            Err(WeightError::TotalOverflow)
        } else if total <= 0.0 {
            Err(WeightError::NoPositiveWeight)
        } else {
            Ok(Self { weights, total })
        }
    }

    pub fn weights(&self) -> &[Float] {
        &self.weights
    }

    pub fn total(&self) -> Float {
        self.total
    }

    pub fn probabilities(&self) -> impl Iterator<Item = Float> + '_ {
        self.weights.iter().map(move |w| w / self.total)
    }

    /// Index of the first candidate whose cumulative weight exceeds `x`.
    ///
    /// `x == cumulative` belongs to the next candidate. Anything at or past
    /// the total goes to the last candidate with a positive weight.
    pub fn select(&self, x: Float) -> usize {
        let mut cumulative = 0.0;
        let mut last_positive = 0;

        for (index, &weight) in self.weights.iter().enumerate() {
            if weight > 0.0 {
                cumulative += weight;
                if cumulative > x {
                    return index;
                }
                last_positive = index;
            }
        }

        last_positive
    }

    pub fn draw<S: Sampler + ?Sized>(&self, sampler: &mut S) -> usize {
        let x = sampler.uniform(self.total);
        let index = self.select(x);
        tracing::trace!(x, total = self.total, index, "weighted draw");
        index
    }
}
