use rand::RngCore;
use rand_distr::{Distribution, Uniform};

use super::ParamGen;
use crate::Result;

/// A parameter generator that follows a certain probabilistic distribution.
#[derive(Debug, Clone)]
pub struct RandParamGen<D: Distribution<f32>> {
    distribution: D,
    remaining: usize,
}

impl<D: Distribution<f32>> RandParamGen<D> {
    /// Creates a new `RandParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `distribution` - The distribution to sample the random numbers from.
    /// * `limit` - The maximum amount of numbers to generate.
    pub fn new(distribution: D, limit: usize) -> Self {
        Self {
            distribution,
            remaining: limit,
        }
    }
}

impl RandParamGen<Uniform<f32>> {
    /// Creates a new `RandParamGen` parameter generator with a uniform distribution.
    ///
    /// # Arguments
    /// * `limit` - The maximum amount of numbers to generate.
    /// * `low` - The inclusive lower limit.
    /// * `high` - The exclusive upper limit.
    ///
    /// # Returns
    /// An error if the range is invalid (low >= high).
    pub fn uniform(limit: usize, low: f32, high: f32) -> Result<Self> {
        Ok(Self::new(Uniform::new(low, high)?, limit))
    }

    /// Creates a new `RandParamGen` parameter generator with the default initialization of an
    /// affine layer, `U(-1/sqrt(fan_in), 1/sqrt(fan_in))` for both weights and biases.
    ///
    /// # Arguments
    /// * `limit` - The maximum amount of numbers to generate.
    /// * `fan_in` - The number of input units of the layer.
    ///
    /// # Returns
    /// An error if the calculated range is invalid (`fan_in` is zero).
    pub fn fan_in_uniform(limit: usize, fan_in: usize) -> Result<Self> {
        let range = 1. / (fan_in as f32).sqrt();
        Self::uniform(limit, -range, range)
    }
}

impl<D: Distribution<f32>> ParamGen for RandParamGen<D> {
    fn sample(&mut self, rng: &mut dyn RngCore, mut n: usize) -> Option<Vec<f32>> {
        if self.remaining == 0 {
            return None;
        }

        n = n.min(self.remaining);
        self.remaining -= n;

        let sample = (0..n).map(|_| self.distribution.sample(rng)).collect();
        Some(sample)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn partial() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut param_gen = RandParamGen::uniform(10, -1., 1.).unwrap();

        assert_eq!(param_gen.sample(&mut rng, 7).unwrap().len(), 7);
        assert_eq!(param_gen.sample(&mut rng, 7).unwrap().len(), 3);
        assert!(param_gen.sample(&mut rng, 1).is_none());
    }

    #[test]
    fn fan_in_uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut param_gen = RandParamGen::fan_in_uniform(1000, 16).unwrap();

        let sample = param_gen.sample(&mut rng, 1000).unwrap();

        assert!(sample.iter().all(|p| (-0.25..0.25).contains(p)));
    }

    #[test]
    fn same_seed_same_sample() {
        let sample = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            RandParamGen::fan_in_uniform(5, 4)
                .unwrap()
                .sample(&mut rng, 5)
                .unwrap()
        };

        assert_eq!(sample(7), sample(7));
        assert_ne!(sample(7), sample(8));
    }

    #[test]
    fn zero_fan_in_is_invalid() {
        assert!(RandParamGen::fan_in_uniform(5, 0).is_err());
    }
}
