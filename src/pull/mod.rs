mod ctx;
mod error;
mod sampler;
mod table;

pub use ctx::{DefaultSampler, PullContext};
pub use error::WeightError;
pub use sampler::Sampler;
pub use table::{Candidate, WeightTable};

pub fn pull<'c, T: Candidate>(
    formula: &crate::Formula,
    candidates: &'c [T],
) -> crate::Result<&'c T> {
    PullContext::default().pull(formula, candidates)
}
