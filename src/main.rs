use std::{env, fs, process};

use anyhow::{Context, Result};
use log::{error, info, warn};
use machine_learning::{
    evaluation::{accuracy, confusion_matrix},
    fit_with,
};
use ndarray::ArrayView1;

mod config;
mod dataset;

use config::RunConfig;
use dataset::{LoadedDataset, Predictions};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <config.json>", args[0]);
        process::exit(1);
    }

    if let Err(e) = run(&args[1]) {
        error!("{e:#}");
        process::exit(1);
    }
}

fn run(config_path: &str) -> Result<()> {
    let config = RunConfig::load(config_path)?;
    let fit_config = config.fit_config();

    let train = LoadedDataset::load(&config.train)?;
    let dev = LoadedDataset::load(&config.dev)?;
    let train_labels = train
        .labels
        .with_context(|| format!("'{}' has no labels", config.train.display()))?;

    let fit = fit_with(
        &fit_config,
        train.features.view(),
        train_labels.view(),
        dev.features.view(),
        config.epochs,
        config.batch_size,
    )?;

    info!("loss per epoch: {:?}", fit.losses);

    if let Some(output) = &config.output {
        let predictions = fit.predictions.to_vec();
        let json = serde_json::to_string(&Predictions {
            predictions: &predictions,
        })?;

        fs::write(output, json)
            .with_context(|| format!("cannot write '{}'", output.display()))?;
        info!("wrote {} predictions to '{}'", fit.predictions.len(), output.display());
    }

    match &dev.labels {
        Some(labels) => {
            if let Err(e) = evaluate(fit.predictions.view(), labels.view(), fit_config.out_size) {
                warn!("skipping evaluation: {e}");
            }
        }
        None => warn!("'{}' has no labels, skipping evaluation", config.dev.display()),
    }

    Ok(())
}

fn evaluate(
    predictions: ArrayView1<usize>,
    labels: ArrayView1<usize>,
    classes: usize,
) -> machine_learning::Result<()> {
    let accuracy = accuracy(predictions, labels)?;
    let matrix = confusion_matrix(predictions, labels, classes)?;

    info!("dev accuracy: {accuracy:.4}");
    info!("dev confusion matrix (rows are labels):\n{matrix}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn evaluation_reports_out_of_range_labels() {
        let predictions = array![0, 1, 2];
        let labels = array![0, 1, 7];

        let err = evaluate(predictions.view(), labels.view(), 4).unwrap_err();

        assert_eq!(
            err,
            machine_learning::MlErr::LabelOutOfRange {
                label: 7,
                classes: 4
            }
        );
    }

    #[test]
    fn evaluation_accepts_matching_labels() {
        let predictions = array![0, 1, 3];

        assert!(evaluate(predictions.view(), predictions.view(), 4).is_ok());
    }
}
