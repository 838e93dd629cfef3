use log::warn;
use ndarray::{Array2, ArrayView2};

use crate::{MlErr, Result};

/// Scalar standardization statistics taken over *every* element of a matrix, not per column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Standardizer {
    mean: f32,
    std_dev: f32,
}

impl Standardizer {
    /// Computes the global mean and sample standard deviation (`N - 1` degrees of freedom)
    /// of `x`.
    ///
    /// # Errors
    /// `MlErr::EmptyInput` if `x` has no elements.
    pub fn fit(x: ArrayView2<f32>) -> Result<Self> {
        let mean = x.mean().ok_or(MlErr::EmptyInput("matrix to standardize"))?;
        let std_dev = x.std(1.);

        if std_dev == 0. || !std_dev.is_finite() {
            warn!("standardizing with a degenerate standard deviation: {std_dev}");
        }

        Ok(Self { mean, std_dev })
    }

    pub fn mean(&self) -> f32 {
        self.mean
    }

    pub fn std_dev(&self) -> f32 {
        self.std_dev
    }

    /// Returns `(x - mean) / std_dev`. A zero deviation is not corrected.
    pub fn transform(&self, x: ArrayView2<f32>) -> Array2<f32> {
        let &Self { mean, std_dev } = self;
        x.mapv(|v| (v - mean) / std_dev)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;

    fn standardize(x: ArrayView2<f32>) -> Result<Array2<f32>> {
        Ok(Standardizer::fit(x)?.transform(x))
    }

    fn assert_close(got: f32, expected: f32) {
        assert!(
            (got - expected).abs() < 1e-5,
            "got: {got}, expected: {expected}"
        );
    }

    #[test]
    fn uses_sample_standard_deviation() {
        let stats = Standardizer::fit(array![[1., 2.], [3., 4.]].view()).unwrap();

        assert_close(stats.mean(), 2.5);
        assert_close(stats.std_dev(), (5f32 / 3.).sqrt());
    }

    #[test]
    fn result_has_zero_mean_and_unit_deviation() {
        let x = array![[1., 7., -3.], [0.5, 2., 10.], [4., 4., 4.]];
        let z = standardize(x.view()).unwrap();

        assert_close(z.mean().unwrap(), 0.);
        assert_close(z.std(1.), 1.);
    }

    #[test]
    fn statistics_are_global_not_per_column() {
        let x = array![[0., 100.], [0., 100.], [2., 102.]];
        let z = standardize(x.view()).unwrap();

        // a per-column standardization would map both columns to the same values
        assert!(z[[0, 0]] < 0.);
        assert!(z[[0, 1]] > 0.);
        assert_close(z[[2, 1]] - z[[0, 1]], z[[2, 0]] - z[[0, 0]]);
    }

    #[test]
    fn zero_deviation_is_not_corrected() {
        let z = standardize(array![[3., 3.], [3., 3.]].view()).unwrap();

        assert!(z.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn empty_matrix_fails() {
        let x = Array2::<f32>::zeros((0, 3));

        assert_eq!(
            standardize(x.view()).unwrap_err(),
            MlErr::EmptyInput("matrix to standardize")
        );
    }
}
