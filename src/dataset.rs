use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// A dataset as stored on disk: one feature row per example and optionally its label.
#[derive(Debug, Deserialize)]
struct RawDataset {
    features: Vec<Vec<f32>>,
    #[serde(default)]
    labels: Option<Vec<usize>>,
}

/// A dataset loaded into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    pub features: Array2<f32>,
    pub labels: Option<Array1<usize>>,
}

impl LoadedDataset {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display()))?;

        Self::from_json(&content).with_context(|| format!("invalid dataset '{}'", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let RawDataset { features, labels } = serde_json::from_str(content)?;

        let rows = features.len();
        let cols = features.first().map_or(0, Vec::len);
        if let Some(i) = features.iter().position(|row| row.len() != cols) {
            bail!("row {i} has {} features, expected {cols}", features[i].len());
        }

        match &labels {
            Some(labels) if labels.len() != rows => {
                bail!("{} labels for {rows} rows", labels.len())
            }
            _ => {}
        }

        let features = Array2::from_shape_vec((rows, cols), features.concat())?;

        Ok(Self {
            features,
            labels: labels.map(Array1::from),
        })
    }
}

/// What `classify` writes to its output file.
#[derive(Debug, Serialize)]
pub struct Predictions<'a> {
    pub predictions: &'a [usize],
}
