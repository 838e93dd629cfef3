use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{MlErr, Result};

/// Returns the index of the maximum score of each row. On ties the first index wins.
pub fn argmax(scores: ArrayView2<f32>) -> Array1<usize> {
    scores
        .axis_iter(Axis(0))
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f32::NEG_INFINITY), |(best, max), (i, &v)| {
                    if v > max { (i, v) } else { (best, max) }
                })
                .0
        })
        .collect()
}

/// Fraction of predictions equal to their label.
///
/// # Errors
/// A size mismatch if the lengths differ, `EmptyInput` if both are empty.
pub fn accuracy(predictions: ArrayView1<usize>, labels: ArrayView1<usize>) -> Result<f32> {
    check_lengths(&predictions, &labels)?;

    if labels.is_empty() {
        return Err(MlErr::EmptyInput("labels"));
    }

    let hits = predictions
        .iter()
        .zip(&labels)
        .filter(|(p, y)| p == y)
        .count();

    Ok(hits as f32 / labels.len() as f32)
}

/// Counts every `(label, prediction)` pair: rows are true labels, columns predictions.
///
/// # Errors
/// A size mismatch if the lengths differ, `LabelOutOfRange` for any index `>= classes`.
pub fn confusion_matrix(
    predictions: ArrayView1<usize>,
    labels: ArrayView1<usize>,
    classes: usize,
) -> Result<Array2<usize>> {
    check_lengths(&predictions, &labels)?;

    let mut matrix = Array2::zeros((classes, classes));
    for (&p, &y) in predictions.iter().zip(&labels) {
        if let Some(&label) = [y, p].iter().find(|&&c| c >= classes) {
            return Err(MlErr::LabelOutOfRange { label, classes });
        }

        matrix[[y, p]] += 1;
    }

    Ok(matrix)
}

fn check_lengths(predictions: &ArrayView1<usize>, labels: &ArrayView1<usize>) -> Result<()> {
    if predictions.len() != labels.len() {
        return Err(MlErr::SizeMismatch {
            what: "predictions",
            got: predictions.len(),
            expected: labels.len(),
        });
    }

    Ok(())
}
