use crate::common::Float;
use rand::Rng;

pub trait Sampler {
    /// Returns a value in `[0, upper)`; `upper` is always finite and positive.
    fn uniform(&mut self, upper: Float) -> Float;
}

impl<R: Rng> Sampler for R {
    fn uniform(&mut self, upper: Float) -> Float {
        self.gen_range(0.0..upper)
    }
}

#[cfg(test)]
pub(crate) use script::ScriptedSampler;
