use rand::RngCore;

use super::{ParamGen, RandParamGen};
use crate::{
    Result,
    arch::{Sequential, layers::Layer},
};

/// A parameter generator that delegates the generation to a chain of parameter generators.
///
/// Used to give each layer of a model its own generator: each link knows how many parameters
/// it has to generate, and the chain moves on to the next one once it's exhausted.
pub struct ChainedParamGen {
    param_gens: Vec<Box<dyn ParamGen>>,
    curr: usize,
}

impl ChainedParamGen {
    /// Creates a new `ChainedParamGen` parameter generator.
    ///
    /// # Arguments
    /// * `param_gens` - A vec of potentially different parameter generators.
    pub fn new(param_gens: Vec<Box<dyn ParamGen>>) -> Self {
        Self {
            param_gens,
            curr: 0,
        }
    }

    /// Creates the default generator chain for a model, one fan-in uniform generator per
    /// layer with parameters.
    ///
    /// # Arguments
    /// * `model` - The model whose parameters will be generated.
    pub fn for_model(model: &Sequential) -> Result<Self> {
        let mut param_gens: Vec<Box<dyn ParamGen>> = Vec::new();

        for layer in model.layers() {
            if let Layer::Dense(dense) = layer {
                let (fan_in, _) = dense.dim();
                let param_gen = RandParamGen::fan_in_uniform(dense.size(), fan_in)?;
                param_gens.push(Box::new(param_gen));
            }
        }

        Ok(Self::new(param_gens))
    }
}

impl ParamGen for ChainedParamGen {
    fn sample(&mut self, rng: &mut dyn RngCore, n: usize) -> Option<Vec<f32>> {
        if self.curr == self.param_gens.len() {
            return None;
        }

        match self.param_gens[self.curr].sample(rng, n) {
            Some(sample) if sample.len() == n => Some(sample),
            Some(mut sample) => {
                self.curr += 1;

                if let Some(next_sample) = self.sample(rng, n - sample.len()) {
                    sample.extend(next_sample);
                }

                Some(sample)
            }
            None => {
                self.curr += 1;
                self.sample(rng, n)
            }
        }
    }
}
