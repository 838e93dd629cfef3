mod dataloader;
mod dataset;

pub use dataloader::DataLoader;
pub use dataset::{Batch, Dataset};
