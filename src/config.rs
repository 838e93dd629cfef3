use std::{fs, num::NonZeroUsize, path::PathBuf};

use anyhow::{Context, Result};
use machine_learning::{DEFAULT_BATCH_SIZE, FitConfig};
use serde::Deserialize;

/// A training run as described by its JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// The labeled training set.
    pub train: PathBuf,
    /// The held-out set, its labels are optional.
    pub dev: PathBuf,
    pub epochs: NonZeroUsize,
    #[serde(default = "default_batch_size")]
    pub batch_size: NonZeroUsize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Where to write the predictions, if anywhere.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

fn default_batch_size() -> NonZeroUsize {
    DEFAULT_BATCH_SIZE
}

fn default_learning_rate() -> f32 {
    FitConfig::default().learning_rate
}

impl RunConfig {
    /// Reads and parses the run configuration at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("cannot read '{path}'"))?;
        Self::from_json(&content).with_context(|| format!("invalid run configuration '{path}'"))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn fit_config(&self) -> FitConfig {
        FitConfig {
            learning_rate: self.learning_rate,
            seed: self.seed,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_take_their_defaults() {
        let config = RunConfig::from_json(
            r#"{ "train": "data/train.json", "dev": "data/dev.json", "epochs": 5 }"#,
        )
        .unwrap();

        assert_eq!(config.train, PathBuf::from("data/train.json"));
        assert_eq!(config.epochs.get(), 5);
        assert_eq!(config.batch_size.get(), 100);
        assert_eq!(config.learning_rate, 0.01);
        assert_eq!(config.seed, None);
        assert_eq!(config.output, None);
    }

    #[test]
    fn every_field_can_be_set() {
        let config = RunConfig::from_json(
            r#"{
                "train": "a.json",
                "dev": "b.json",
                "epochs": 50,
                "batch_size": 32,
                "learning_rate": 0.1,
                "seed": 42,
                "output": "predictions.json"
            }"#,
        )
        .unwrap();

        let fit_config = config.fit_config();
        assert_eq!(config.batch_size.get(), 32);
        assert_eq!(fit_config.learning_rate, 0.1);
        assert_eq!(fit_config.seed, Some(42));
        assert_eq!(fit_config.out_size, 4);
        assert_eq!(config.output, Some(PathBuf::from("predictions.json")));
    }

    #[test]
    fn zero_epochs_is_rejected() {
        let result = RunConfig::from_json(r#"{ "train": "a", "dev": "b", "epochs": 0 }"#);

        assert!(result.is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result =
            RunConfig::from_json(r#"{ "train": "a", "dev": "b", "epochs": 1, "epoch": 2 }"#);

        assert!(result.is_err());
    }
}
