use rand::RngCore;

use crate::{MlErr, Result};

/// A `ParamGen` generates values for the initial state of the model's parameters.
pub trait ParamGen {
    /// Should sample at most `n` parameters.
    ///
    /// # Arguments
    /// * `rng` - The source of randomness, generators that don't need it ignore it.
    /// * `n` - The upper limit of samples to generate.
    ///
    /// # Returns
    /// `None` if the generator is exhausted.
    fn sample(&mut self, rng: &mut dyn RngCore, n: usize) -> Option<Vec<f32>>;

    /// Samples exactly `n` parameters.
    ///
    /// # Returns
    /// A size mismatch if the generator got exhausted before producing `n` values.
    fn sample_exact(&mut self, rng: &mut dyn RngCore, n: usize) -> Result<Vec<f32>> {
        let sample = self.sample(rng, n).unwrap_or_default();

        if sample.len() != n {
            return Err(MlErr::SizeMismatch {
                what: "initial parameters",
                got: sample.len(),
                expected: n,
            });
        }

        Ok(sample)
    }
}
