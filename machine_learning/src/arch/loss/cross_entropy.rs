use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use super::LossFn;
use crate::{MlErr, Result};

/// Softmax cross-entropy over raw scores, averaged over the batch.
///
/// For a row of scores `z` and label `c` the loss is `logsumexp(z) - z[c]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrossEntropy;

impl CrossEntropy {
    /// Returns a new `CrossEntropy`.
    pub fn new() -> Self {
        Self
    }

    fn check(&self, y_pred: &ArrayView2<f32>, y: &ArrayView1<usize>) -> Result<()> {
        if y_pred.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "labels",
                got: y.len(),
                expected: y_pred.nrows(),
            });
        }

        if y_pred.nrows() == 0 {
            return Err(MlErr::EmptyInput("batch"));
        }

        let classes = y_pred.ncols();
        match y.iter().find(|&&label| label >= classes) {
            Some(&label) => Err(MlErr::LabelOutOfRange { label, classes }),
            None => Ok(()),
        }
    }
}

/// Numerically stable row-wise softmax.
pub fn softmax(z: ArrayView2<f32>) -> Array2<f32> {
    let mut out = z.to_owned();

    for mut row in out.axis_iter_mut(Axis(0)) {
        let max = row.fold(f32::NEG_INFINITY, |m, &x| m.max(x));
        row.mapv_inplace(|x| (x - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|x| x / sum);
    }

    out
}

impl LossFn for CrossEntropy {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView1<usize>) -> Result<f32> {
        self.check(&y_pred, &y)?;

        let total: f32 = y_pred
            .axis_iter(Axis(0))
            .zip(y)
            .map(|(row, &label)| {
                let max = row.fold(f32::NEG_INFINITY, |m, &x| m.max(x));
                let logsumexp = max + row.mapv(|x| (x - max).exp()).sum().ln();
                logsumexp - row[label]
            })
            .sum();

        Ok(total / y.len() as f32)
    }

    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView1<usize>) -> Result<Array2<f32>> {
        self.check(&y_pred, &y)?;

        let n = y.len() as f32;
        let mut d = softmax(y_pred);
        for (mut row, &label) in d.axis_iter_mut(Axis(0)).zip(y) {
            row[label] -= 1.;
        }

        d.mapv_inplace(|x| x / n);
        Ok(d)
    }
}
