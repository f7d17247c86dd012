use super::{
    sampler::Sampler,
    table::{Candidate, WeightTable},
};
use crate::formula::Formula;
use rand::{rngs::StdRng, SeedableRng};

pub type DefaultSampler = rand::rngs::ThreadRng;

/// Give each worker its own context; the formulas and candidates it pulls
/// against can be shared.
pub struct PullContext<S = DefaultSampler> {
    sampler: S,
    pulls: usize,
}

impl<S: Sampler> PullContext<S> {
    pub fn new(sampler: S) -> Self {
        Self { sampler, pulls: 0 }
    }

    /// Number of successful pulls made through this context.
    pub fn pulls(&self) -> usize {
        self.pulls
    }

    pub fn into_sampler(self) -> S {
        self.sampler
    }

    pub fn pull<'c, T: Candidate>(
        &mut self,
        formula: &Formula,
        candidates: &'c [T],
    ) -> crate::Result<&'c T> {
        let index = self.pull_index(formula, candidates)?;
        Ok(&candidates[index])
    }

    pub fn pull_index<T: Candidate>(
        &mut self,
        formula: &Formula,
        candidates: &[T],
    ) -> crate::Result<usize> {
        let table = WeightTable::compute(formula, candidates)?;
        Ok(self.draw(&table))
    }

    /// Pulls `n` times, weighing the candidates only once.
    pub fn pull_many<'c, T: Candidate>(
        &mut self,
        formula: &Formula,
        candidates: &'c [T],
        n: usize,
    ) -> crate::Result<Vec<&'c T>> {
        let table = WeightTable::compute(formula, candidates)?;
        Ok((0..n).map(|_| &candidates[self.draw(&table)]).collect())
    }

    pub fn draw(&mut self, table: &WeightTable) -> usize {
        self.pulls += 1;
        table.draw(&mut self.sampler)
    }
}

impl PullContext<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for PullContext {
    fn default() -> Self {
        Self::new(rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pull::{sampler::ScriptedSampler, WeightError};
    use crate::Error;

    #[derive(Debug, PartialEq)]
    struct Card {
        id: &'static str,
        rarity: f64,
    }

    impl Candidate for Card {
        fn rarity(&self) -> f64 {
            self.rarity
        }
    }

    const CARDS: &[Card] = &[
        Card {
            id: "common",
            rarity: 2.0,
        },
        Card {
            id: "rare",
            rarity: 3.0,
        },
        Card {
            id: "legendary",
            rarity: 10.0,
        },
    ];

    #[test]
    fn test_pull_returns_candidate() {
        let formula = Formula::compile("R").unwrap();
        let mut ctx = PullContext::new(ScriptedSampler::new(vec![0.1, 0.25, 0.5]));
        assert_eq!(ctx.pull(&formula, CARDS).unwrap().id, "common");
        assert_eq!(ctx.pull(&formula, CARDS).unwrap().id, "rare");
        assert_eq!(ctx.pull(&formula, CARDS).unwrap().id, "legendary");
        assert_eq!(ctx.pulls(), 3);
    }

    #[test]
    fn test_into_sampler_keeps_position() {
        let formula = Formula::compile("R").unwrap();
        let mut ctx = PullContext::new(ScriptedSampler::new(vec![0.0, 0.5, 0.9]));
        ctx.pull(&formula, CARDS).unwrap();

        let mut sampler = ctx.into_sampler();
        assert_eq!(sampler.uniform(2.0), 1.0);
    }

    #[test]
    fn test_pull_frequencies() {
        const N: usize = 100_000;

        let formula = Formula::compile("R").unwrap();
        let mut ctx = PullContext::seeded(0x5eed);
        let mut counts = [0usize; 3];
        for _ in 0..N {
            counts[ctx.pull_index(&formula, CARDS).unwrap()] += 1;
        }

        let expected = [2.0 / 15.0, 3.0 / 15.0, 10.0 / 15.0];
        for (count, expected) in counts.iter().zip(expected) {
            let observed = *count as f64 / N as f64;
            assert!(
                (observed - expected).abs() < 0.02,
                "observed {}, expected {}",
                observed,
                expected
            );
        }
        assert_eq!(ctx.pulls(), N);
    }

    #[test]
    fn test_pull_many_matches_single_pulls() {
        let formula = Formula::compile("1 + 1 / R").unwrap();
        let picks = PullContext::seeded(42)
            .pull_many(&formula, CARDS, 50)
            .unwrap();

        let mut ctx = PullContext::seeded(42);
        let singles: Vec<_> = (0..50)
            .map(|_| ctx.pull(&formula, CARDS).unwrap())
            .collect();
        assert_eq!(picks, singles);
    }

    #[test]
    fn test_failed_pull_is_not_counted() {
        let mut ctx = PullContext::seeded(1);

        let zero = Formula::compile("0 * R").unwrap();
        assert_eq!(
            ctx.pull(&zero, CARDS),
            Err(Error::Weight(WeightError::NoPositiveWeight))
        );

        let empty: &[Card] = &[];
        assert_eq!(
            ctx.pull(&zero, empty),
            Err(Error::Weight(WeightError::Empty))
        );

        let div = Formula::compile("1 / (R - 3)").unwrap();
        assert!(matches!(ctx.pull(&div, CARDS), Err(Error::Eval(_))));

        assert_eq!(ctx.pulls(), 0);
    }

    #[test]
    fn test_zero_weight_never_pulled() {
        let formula = Formula::compile("R - 2").unwrap();
        let mut ctx = PullContext::seeded(3);
        let picks = ctx.pull_many(&formula, CARDS, 1000).unwrap();
        assert!(picks.iter().all(|card| card.id != "common"));
    }
}
