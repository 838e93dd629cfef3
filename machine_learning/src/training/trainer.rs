use std::num::NonZeroUsize;

use log::{debug, info};

use crate::{
    Result,
    arch::Model,
    data::{DataLoader, Dataset},
};

/// The epoch loop: steps a `Model` over every ordered batch of a `Dataset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trainer {
    epochs: NonZeroUsize,
    batch_size: NonZeroUsize,
}

impl Trainer {
    /// Creates a new `Trainer`.
    ///
    /// # Arguments
    /// * `epochs` - The amount of full passes over the dataset.
    /// * `batch_size` - The amount of rows per step, the last batch of an epoch may be shorter.
    ///
    /// # Returns
    /// A new `Trainer` instance.
    pub fn new(epochs: NonZeroUsize, batch_size: NonZeroUsize) -> Self {
        Self { epochs, batch_size }
    }

    /// Trains `model` on `dataset`.
    ///
    /// # Arguments
    /// * `model` - The model to train, its parameters get updated on every batch.
    /// * `dataset` - The training set, visited in order.
    ///
    /// # Returns
    /// The loss trajectory, one entry per epoch holding the sum of its batch losses.
    pub fn train<M: Model>(&self, model: &mut M, dataset: &Dataset) -> Result<Vec<f32>> {
        let mut losses = Vec::with_capacity(self.epochs.get());

        for epoch in 0..self.epochs.get() {
            let loader = DataLoader::new(dataset, self.batch_size);
            let batches = loader.num_batches();
            let mut total = 0.;

            for (i, batch) in loader.enumerate() {
                let loss = model.step(batch.x, batch.y)?;
                debug!(
                    "epoch {epoch} batch {}/{batches} ({} rows): loss {loss}",
                    i + 1,
                    batch.len()
                );
                total += loss;
            }

            info!("epoch {epoch}: loss {total}");
            losses.push(total);
        }

        Ok(losses)
    }
}
