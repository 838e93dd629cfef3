use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::Result;

/// A loss over a batch of raw class scores and their true labels.
pub trait LossFn {
    /// Returns the mean loss of the batch.
    ///
    /// # Arguments
    /// * `y_pred` - An `(N, classes)` matrix of raw scores.
    /// * `y` - The `N` true labels.
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView1<usize>) -> Result<f32>;

    /// Returns the derivative of `loss` with respect to each entry of `y_pred`.
    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView1<usize>) -> Result<Array2<f32>>;
}
