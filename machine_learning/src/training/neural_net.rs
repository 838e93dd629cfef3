use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::RngCore;

use crate::{
    MlErr, Result,
    arch::{Model, Sequential, layers::Layer, loss::LossFn},
    evaluation::argmax,
    initialization::{ChainedParamGen, ParamGen},
    optimization::{GradientDescent, Optimizer},
};

/// Width of the hidden layer.
pub const HIDDEN_SIZE: usize = 32;

/// A two layer perceptron, `in_size -> 32 -> out_size` with a rectified linear unit in
/// between, trained with plain gradient descent.
///
/// The network owns its flat parameter buffer and a gradient buffer of the same size, both
/// are reused on every `step`.
#[derive(Debug, Clone)]
pub struct NeuralNet<L: LossFn> {
    model: Sequential,
    params: Vec<f32>,
    grad: Vec<f32>,
    loss_fn: L,
    optimizer: GradientDescent,
    in_size: usize,
    out_size: usize,
}

impl<L: LossFn> NeuralNet<L> {
    /// Creates a new `NeuralNet` with randomly initialized parameters.
    ///
    /// # Arguments
    /// * `learning_rate` - The step size of the gradient descent.
    /// * `loss_fn` - The loss minimized by `step`.
    /// * `in_size` - The width of the input features.
    /// * `out_size` - The amount of output classes.
    /// * `rng` - The source of the initial parameters, seed it for reproducible runs.
    ///
    /// # Returns
    /// A new `NeuralNet` or an error if any of the sizes is zero.
    pub fn new<R: RngCore>(
        learning_rate: f32,
        loss_fn: L,
        in_size: usize,
        out_size: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if in_size == 0 {
            return Err(MlErr::EmptyInput("input features"));
        }
        if out_size == 0 {
            return Err(MlErr::EmptyInput("output classes"));
        }

        let model = Sequential::new([
            Layer::dense((in_size, HIDDEN_SIZE)),
            Layer::relu(),
            Layer::dense((HIDDEN_SIZE, out_size)),
        ]);
        let params = ChainedParamGen::for_model(&model)?.sample_exact(rng, model.size())?;

        Ok(Self {
            grad: vec![0.; params.len()],
            model,
            params,
            loss_fn,
            optimizer: GradientDescent::new(learning_rate),
            in_size,
            out_size,
        })
    }

    /// Returns the predicted class of every row of `x`, the argmax of its scores.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array1<usize>> {
        Ok(argmax(self.forward(x)?.view()))
    }

    pub fn params(&self) -> &[f32] {
        &self.params
    }

    pub fn in_size(&self) -> usize {
        self.in_size
    }

    pub fn out_size(&self) -> usize {
        self.out_size
    }

    pub fn learning_rate(&self) -> f32 {
        self.optimizer.learning_rate()
    }
}

impl<L: LossFn> Model for NeuralNet<L> {
    fn forward(&self, x: ArrayView2<f32>) -> Result<Array2<f32>> {
        self.model.forward(&self.params, x)
    }

    fn step(&mut self, x: ArrayView2<f32>, y: ArrayView1<usize>) -> Result<f32> {
        let loss = self
            .model
            .backprop(&self.params, &mut self.grad, &self.loss_fn, x, y)?;

        self.optimizer.update_params(&mut self.params, &self.grad);
        debug!("step over {} rows, loss {loss}", y.len());

        Ok(loss)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::arch::loss::CrossEntropy;

    fn net(seed: u64) -> NeuralNet<CrossEntropy> {
        let mut rng = StdRng::seed_from_u64(seed);
        NeuralNet::new(0.01, CrossEntropy, 8, 4, &mut rng).unwrap()
    }

    fn batch() -> (Array2<f32>, Array1<usize>) {
        let x = Array2::from_shape_fn((6, 8), |(i, j)| ((i * 8 + j) as f32 * 0.7).cos());
        let y = Array1::from_shape_fn(6, |i| i % 4);
        (x, y)
    }

    #[test]
    fn has_the_expected_topology() {
        let net = net(0);

        assert_eq!(net.params().len(), (8 + 1) * HIDDEN_SIZE + (HIDDEN_SIZE + 1) * 4);
        assert_eq!(net.in_size(), 8);
        assert_eq!(net.out_size(), 4);
        assert_eq!(net.learning_rate(), 0.01);
    }

    #[test]
    fn forward_gives_one_score_per_class() {
        let (x, _) = batch();
        let scores = net(0).forward(x.view()).unwrap();

        assert_eq!(scores.dim(), (6, 4));
    }

    #[test]
    fn forward_is_pure() {
        let net = net(1);
        let (x, _) = batch();

        let first = net.forward(x.view()).unwrap();
        let second = net.forward(x.view()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn step_returns_the_loss_before_the_update() {
        let mut net = net(2);
        let (x, y) = batch();

        let before = net.params().to_vec();
        let expected = CrossEntropy
            .loss(net.forward(x.view()).unwrap().view(), y.view())
            .unwrap();

        let loss = net.step(x.view(), y.view()).unwrap();

        assert_eq!(loss, expected);
        assert_ne!(net.params(), &before[..]);
    }

    #[test]
    fn repeated_steps_on_one_batch_lower_the_loss() {
        let mut net = net(3);
        let (x, y) = batch();

        let first = net.step(x.view(), y.view()).unwrap();
        let mut last = first;
        for _ in 0..200 {
            last = net.step(x.view(), y.view()).unwrap();
        }

        assert!(last < first, "first: {first}, last: {last}");
    }

    #[test]
    fn wrong_feature_width_fails_fast() {
        let mut net = net(4);
        let x = Array2::<f32>::zeros((2, 7));
        let y = array![0, 1];

        let before = net.params().to_vec();
        let err = net.step(x.view(), y.view()).unwrap_err();

        assert!(matches!(err, MlErr::SizeMismatch { got: 7, expected: 8, .. }));
        assert_eq!(net.params(), &before[..]);
    }

    #[test]
    fn predictions_are_class_indices() {
        let (x, _) = batch();
        let predictions = net(5).predict(x.view()).unwrap();

        assert_eq!(predictions.len(), 6);
        assert!(predictions.iter().all(|&p| p < 4));
    }

    #[test]
    fn same_seed_same_parameters() {
        assert_eq!(net(9).params(), net(9).params());
        assert_ne!(net(9).params(), net(10).params());
    }

    #[test]
    fn zero_classes_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = NeuralNet::new(0.01, CrossEntropy, 8, 0, &mut rng).unwrap_err();

        assert_eq!(err, MlErr::EmptyInput("output classes"));
    }

    #[test]
    fn zero_features_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = NeuralNet::new(0.01, CrossEntropy, 0, 4, &mut rng).unwrap_err();

        assert_eq!(err, MlErr::EmptyInput("input features"));
    }
}
