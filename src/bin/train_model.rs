// ABOUTME: Offline training job producing the nutrition model artifact
// ABOUTME: Generates synthetic profiles, fits the random forest, reports held-out MSE, saves JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Model Training Binary
//!
//! ```bash
//! train-model --samples 10000 --output models/nutrition_model.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use nutrition_coach::logging::LoggingConfig;
use nutrition_core::constants::{defaults, service_names};
use nutrition_intelligence::forest::{ForestParams, TreeParams};
use nutrition_intelligence::training::{run_training, TrainingOptions};
use std::path::PathBuf;
use tracing::info;

/// Training run options
#[derive(Parser)]
#[command(name = "train-model")]
#[command(about = "Train the nutrition target random forest on synthetic profiles")]
pub struct Args {
    /// Number of synthetic profiles to generate
    #[arg(long, default_value_t = defaults::TRAINING_SAMPLES)]
    samples: usize,

    /// Where to write the model artifact
    #[arg(long, default_value = defaults::MODEL_PATH)]
    output: PathBuf,

    /// Seed for data generation, the split, and the forest
    #[arg(long, default_value_t = defaults::RANDOM_SEED)]
    seed: u64,

    /// Number of trees
    #[arg(long, default_value_t = defaults::N_ESTIMATORS)]
    trees: usize,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = defaults::TEST_FRACTION)]
    test_fraction: f64,

    /// Maximum tree depth (unbounded when omitted)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Minimum rows required to split a node
    #[arg(long, default_value_t = 2)]
    min_samples_split: usize,

    /// Minimum rows in each leaf
    #[arg(long, default_value_t = 1)]
    min_samples_leaf: usize,
}

impl Args {
    fn training_options(&self) -> TrainingOptions {
        TrainingOptions {
            samples: self.samples,
            seed: self.seed,
            test_fraction: self.test_fraction,
            forest: ForestParams {
                n_estimators: self.trees,
                tree: TreeParams {
                    max_depth: self.max_depth,
                    min_samples_split: self.min_samples_split,
                    min_samples_leaf: self.min_samples_leaf,
                    ..TreeParams::default()
                },
                seed: self.seed,
                ..ForestParams::default()
            },
            ..TrainingOptions::default()
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    LoggingConfig::from_env_for(service_names::TRAIN_MODEL).init()?;

    info!(
        samples = args.samples,
        trees = args.trees,
        seed = args.seed,
        output = %args.output.display(),
        "Training nutrition model"
    );

    let summary = run_training(&args.training_options(), &args.output)
        .with_context(|| format!("Training failed for {}", args.output.display()))?;

    info!(
        train_rows = summary.train_rows,
        test_rows = summary.test_rows,
        elapsed_ms = summary.elapsed.as_millis(),
        "Model saved to {}",
        summary.artifact_path.display()
    );
    println!("{}", summary.report);
    println!("Model MSE: {}", summary.report.mse);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_args_map_onto_training_options() -> Result<(), clap::Error> {
        let args = Args::try_parse_from(["train-model", "--trees", "7"])?;
        let options = args.training_options();
        assert_eq!(options.samples, defaults::TRAINING_SAMPLES);
        assert_eq!(options.forest.n_estimators, 7);
        assert_eq!(options.forest.seed, defaults::RANDOM_SEED);
        Ok(())
    }
}
