mod fit;
mod neural_net;
mod trainer;

pub use fit::{DEFAULT_BATCH_SIZE, Fit, FitConfig, fit, fit_with};
pub use neural_net::{HIDDEN_SIZE, NeuralNet};
pub use trainer::Trainer;
