use std::num::NonZeroUsize;

use super::dataset::{Batch, Dataset};

/// An ordered, non-shuffling loader producing borrowed batches (zero-copy).
///
/// Batches are consecutive runs of `batch_size` rows in dataset order, the last one may be
/// shorter.
#[derive(Debug, Clone)]
pub struct DataLoader<'a> {
    dataset: &'a Dataset,
    batch_size: NonZeroUsize,
    cursor: usize,
}

impl<'a> DataLoader<'a> {
    pub fn new(dataset: &'a Dataset, batch_size: NonZeroUsize) -> Self {
        Self {
            dataset,
            batch_size,
            cursor: 0,
        }
    }

    /// Returns the amount of batches in a full pass, `ceil(len / batch_size)`.
    #[inline]
    pub fn num_batches(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size.get())
    }

    /// Returns the next borrowed batch, or None if exhausted.
    pub fn next_batch(&mut self) -> Option<Batch<'a>> {
        if self.cursor >= self.dataset.len() {
            return None;
        }

        let end = (self.cursor + self.batch_size.get()).min(self.dataset.len());
        let batch = self.dataset.slice(self.cursor, end);

        self.cursor = end;
        Some(batch)
    }
}

impl<'a> Iterator for DataLoader<'a> {
    type Item = Batch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_batch()
    }
}
