use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::Result;

/// A trainable classifier as seen by the training loop.
pub trait Model {
    /// Computes the raw class scores for every row of `x`. Doesn't modify the model.
    ///
    /// # Arguments
    /// * `x` - An `(N, in_size)` matrix of features.
    ///
    /// # Returns
    /// An `(N, out_size)` matrix of scores.
    fn forward(&self, x: ArrayView2<f32>) -> Result<Array2<f32>>;

    /// Makes a single optimization step over one batch. **The model's parameters get
    /// updated** according to its optimizer.
    ///
    /// # Arguments
    /// * `x` - The batch features.
    /// * `y` - The batch labels.
    ///
    /// # Returns
    /// The mean loss of the batch before the update.
    fn step(&mut self, x: ArrayView2<f32>, y: ArrayView1<usize>) -> Result<f32>;
}
