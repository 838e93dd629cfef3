use ndarray::{Array2, ArrayView2};

use super::{Dense, Relu};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Dense(Dense),
    Relu(Relu),
}

impl Layer {
    pub fn dense(dim: (usize, usize)) -> Self {
        Self::Dense(Dense::new(dim))
    }

    pub fn relu() -> Self {
        Self::Relu(Relu::new())
    }

    /// Returns the amount of parameters this layer takes from the model's buffer.
    pub fn size(&self) -> usize {
        match self {
            Self::Dense(l) => l.size(),
            Self::Relu(_) => 0,
        }
    }

    pub fn forward(&self, params: &[f32], x: ArrayView2<f32>) -> Result<Array2<f32>> {
        match self {
            Self::Dense(l) => l.forward(params, x),
            Self::Relu(l) => Ok(l.forward(x)),
        }
    }

    pub fn backward(
        &self,
        params: &[f32],
        grad: &mut [f32],
        x: ArrayView2<f32>,
        d: ArrayView2<f32>,
    ) -> Result<Array2<f32>> {
        match self {
            Self::Dense(l) => l.backward(params, grad, x, d),
            Self::Relu(l) => l.backward(x, d),
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn relu_takes_no_parameters() {
        assert_eq!(Layer::relu().size(), 0);
        assert_eq!(Layer::dense((3, 2)).size(), 8);
    }

    #[test]
    fn relu_dispatch_clamps_and_masks() {
        let layer = Layer::relu();
        let x = array![[-1., 2.], [0., -3.]];
        let d = array![[5., 6.], [7., 8.]];

        let y = layer.forward(&[], x.view()).unwrap();
        let back = layer.backward(&[], &mut [], x.view(), d.view()).unwrap();

        assert_eq!(y, array![[0., 2.], [0., 0.]]);
        assert_eq!(back, array![[0., 6.], [0., 0.]]);
    }

    #[test]
    fn dense_dispatch_uses_the_given_slice() {
        let layer = Layer::dense((2, 1));
        let x = array![[1., 2.]];

        let y = layer.forward(&[3., 4., 0.5], x.view()).unwrap();

        assert_eq!(y, array![[11.5]]);
    }
}
