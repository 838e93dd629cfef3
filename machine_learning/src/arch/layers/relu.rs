use ndarray::{Array2, ArrayView2, Zip};

use crate::{MlErr, Result};

/// Rectified linear unit, `max(0, x)` applied elementwise. Has no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relu;

impl Relu {
    pub fn new() -> Self {
        Self
    }

    pub fn forward(&self, x: ArrayView2<f32>) -> Array2<f32> {
        x.mapv(|x| x.max(0.))
    }

    /// Masks the incoming delta with the sign of the input seen on the forward pass.
    pub fn backward(&self, x: ArrayView2<f32>, d: ArrayView2<f32>) -> Result<Array2<f32>> {
        if x.dim() != d.dim() {
            return Err(MlErr::SizeMismatch {
                what: "relu delta",
                got: d.len(),
                expected: x.len(),
            });
        }

        let mut out = d.to_owned();
        Zip::from(&mut out).and(&x).for_each(|d, &x| {
            if x <= 0. {
                *d = 0.;
            }
        });

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn forward_clamps_negatives() {
        let x = array![[-1., 0., 2.], [3., -0.5, 0.25]];
        assert_eq!(
            Relu.forward(x.view()),
            array![[0., 0., 2.], [3., 0., 0.25]]
        );
    }

    #[test]
    fn backward_only_lets_positive_inputs_through() {
        let x = array![[-1., 0., 2.]];
        let d = array![[5., 5., 5.]];
        assert_eq!(
            Relu.backward(x.view(), d.view()).unwrap(),
            array![[0., 0., 5.]]
        );
    }
}
