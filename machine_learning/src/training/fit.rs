use std::num::NonZeroUsize;

use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::{SeedableRng, rngs::StdRng};

use super::{HIDDEN_SIZE, NeuralNet, Trainer};
use crate::{MlErr, Result, arch::loss::CrossEntropy, data::Dataset, preprocessing::Standardizer};

/// The batch size used when the caller has no preference.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(100).unwrap();

/// The knobs of `fit_with` that `fit` keeps fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConfig {
    pub learning_rate: f32,
    pub out_size: usize,
    /// Seeds the parameter initialization, `None` draws a seed from the OS.
    pub seed: Option<u64>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            out_size: 4,
            seed: None,
        }
    }
}

/// The outcome of a training run.
#[derive(Debug, Clone)]
pub struct Fit {
    /// One entry per epoch, the sum of that epoch's batch losses.
    pub losses: Vec<f32>,
    /// The predicted class of every held-out row.
    pub predictions: Array1<usize>,
    pub net: NeuralNet<CrossEntropy>,
}

/// Trains a fresh classifier on `train_set` and predicts the classes of `dev_set`, using
/// the default `FitConfig`.
///
/// # Arguments
/// * `train_set` - An `(N, D)` matrix of training features.
/// * `train_labels` - The `N` class indices of the training rows.
/// * `dev_set` - An `(M, D)` matrix of held-out features.
/// * `epochs` - The amount of full passes over the training set.
/// * `batch_size` - The amount of rows per gradient step.
///
/// # Returns
/// The loss trajectory, the held-out predictions and the trained network.
pub fn fit(
    train_set: ArrayView2<f32>,
    train_labels: ArrayView1<usize>,
    dev_set: ArrayView2<f32>,
    epochs: NonZeroUsize,
    batch_size: NonZeroUsize,
) -> Result<Fit> {
    fit_with(
        &FitConfig::default(),
        train_set,
        train_labels,
        dev_set,
        epochs,
        batch_size,
    )
}

/// Same as `fit` with an explicit `FitConfig`.
pub fn fit_with(
    config: &FitConfig,
    train_set: ArrayView2<f32>,
    train_labels: ArrayView1<usize>,
    dev_set: ArrayView2<f32>,
    epochs: NonZeroUsize,
    batch_size: NonZeroUsize,
) -> Result<Fit> {
    if dev_set.ncols() != train_set.ncols() {
        return Err(MlErr::SizeMismatch {
            what: "held-out features",
            got: dev_set.ncols(),
            expected: train_set.ncols(),
        });
    }

    // each set is standardized with its own statistics
    let train_set = standardize("training", train_set)?;
    let dev_set = standardize("held-out", dev_set)?;
    let dataset = Dataset::new(train_set, train_labels.to_owned())?;

    let mut rng = generate_rng(config.seed);
    let mut net = NeuralNet::new(
        config.learning_rate,
        CrossEntropy,
        dataset.features(),
        config.out_size,
        &mut rng,
    )?;

    info!(
        "training a {}-{HIDDEN_SIZE}-{} network on {} rows for {epochs} epochs, \
         batch size {batch_size}, learning rate {}",
        net.in_size(),
        net.out_size(),
        dataset.len(),
        net.learning_rate(),
    );

    let losses = Trainer::new(epochs, batch_size).train(&mut net, &dataset)?;
    let predictions = net.predict(dev_set.view())?;

    Ok(Fit {
        losses,
        predictions,
        net,
    })
}

fn standardize(name: &str, x: ArrayView2<f32>) -> Result<Array2<f32>> {
    let stats = Standardizer::fit(x)?;
    debug!(
        "{name} set: mean {}, standard deviation {}",
        stats.mean(),
        stats.std_dev()
    );

    Ok(stats.transform(x))
}

fn generate_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
