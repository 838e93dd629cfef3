//! A shallow feed-forward classifier, `in -> 32 -> ReLU -> out`, trained with mini-batch
//! gradient descent over ordered batches.
//!
//! `training::fit` is the entry point: it standardizes the inputs, trains a fresh
//! `NeuralNet` and predicts the classes of a held-out set.

pub mod arch;
pub mod data;
pub mod error;
pub mod evaluation;
pub mod initialization;
pub mod optimization;
pub mod preprocessing;
pub mod training;

pub use error::{MlErr, Result};
pub use training::{DEFAULT_BATCH_SIZE, Fit, FitConfig, NeuralNet, fit, fit_with};
