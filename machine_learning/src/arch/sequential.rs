use ndarray::{Array2, ArrayView1, ArrayView2};

use super::{layers::Layer, loss::LossFn};
use crate::{MlErr, Result};

/// A sequential model: information flows forward when computing an output and backward when
/// computing the *deltas* of its layers.
///
/// The model holds no parameters, each call receives the flat parameter buffer and every
/// layer takes its contiguous slice of it in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequential {
    layers: Vec<Layer>,
}

impl Sequential {
    /// Creates a new `Sequential`.
    ///
    /// # Arguments
    /// * `layers` - The layers the sequential is composed of.
    ///
    /// # Returns
    /// A new `Sequential` instance.
    pub fn new<I>(layers: I) -> Self
    where
        I: IntoIterator<Item = Layer>,
    {
        Self {
            layers: layers.into_iter().collect(),
        }
    }

    /// Returns the amount of parameters in the model.
    pub fn size(&self) -> usize {
        self.layers.iter().map(|layer| layer.size()).sum()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `x` - The input data.
    ///
    /// # Returns
    /// The prediction for the given input or an error if occurred.
    pub fn forward(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        self.check_params(params.len())?;

        let mut offset = 0;
        let mut out = x.to_owned();

        for layer in &self.layers {
            let size = layer.size();
            out = layer.forward(&params[offset..offset + size], out.view())?;
            offset += size;
        }

        Ok(out)
    }

    /// Computes the gradient of the loss function with respect to every parameter over one
    /// batch.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `grad` - A buffer of the same size as `params`, overwritten with the gradient.
    /// * `loss_fn` - The loss function.
    /// * `x` - The batch features.
    /// * `y` - The batch labels.
    ///
    /// # Returns
    /// The batch loss at `params`.
    pub fn backprop<L>(
        &self,
        params: &[f32],
        grad: &mut [f32],
        loss_fn: &L,
        x: ArrayView2<f32>,
        y: ArrayView1<usize>,
    ) -> Result<f32>
    where
        L: LossFn,
    {
        self.check_params(params.len())?;
        self.check_params(grad.len())?;

        // inputs[i] is what the i-th layer saw, the last entry is the model's output
        let mut inputs = Vec::with_capacity(self.layers.len() + 1);
        inputs.push(x.to_owned());

        let mut offset = 0;
        for layer in &self.layers {
            let size = layer.size();
            let out = layer.forward(&params[offset..offset + size], inputs[inputs.len() - 1].view())?;
            inputs.push(out);
            offset += size;
        }

        let Some(y_pred) = inputs.pop() else {
            return Err(MlErr::EmptyInput("layer outputs"));
        };

        let loss = loss_fn.loss(y_pred.view(), y)?;
        let mut d = loss_fn.loss_prime(y_pred.view(), y)?;

        let mut end = params.len();
        for (layer, input) in self.layers.iter().zip(&inputs).rev() {
            let start = end - layer.size();
            d = layer.backward(
                &params[start..end],
                &mut grad[start..end],
                input.view(),
                d.view(),
            )?;
            end = start;
        }

        Ok(loss)
    }

    fn check_params(&self, got: usize) -> Result<()> {
        let expected = self.size();
        if got != expected {
            return Err(MlErr::SizeMismatch {
                what: "parameters",
                got,
                expected,
            });
        }

        Ok(())
    }
}
