// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Feature/target column order, error messages, and service defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Groups constants by domain. The feature column order in [`features`] is the
//! one contract the trained model and the prediction service must share.

/// Ordered feature columns and categorical groups
pub mod features;

/// Model output columns
pub mod targets {
    /// Number of regression outputs
    pub const TARGET_COUNT: usize = 4;

    /// Output order produced by the model: calories (kcal), protein, carbs, fat (g)
    pub const TARGET_COLUMNS: [&str; TARGET_COUNT] = ["calories", "protein", "carbs", "fat"];
}

/// User-facing error messages that are part of the HTTP contract
pub mod error_messages {
    /// Message returned while the model artifact is not loaded
    pub const MODEL_NOT_LOADED: &str = "model not loaded";

    /// Prefix for generic prediction failures
    pub const PREDICTION_FAILED_PREFIX: &str = "An error occurred during prediction";
}

/// Service-wide defaults
pub mod defaults {
    /// Default HTTP port of the prediction service
    pub const HTTP_PORT: u16 = 8001;

    /// Default bind address
    pub const HTTP_HOST: &str = "0.0.0.0";

    /// Default relative path of the persisted model artifact
    pub const MODEL_PATH: &str = "models/nutrition_model.json";

    /// Default number of synthetic training samples
    pub const TRAINING_SAMPLES: usize = 10_000;

    /// Default random seed for data generation, splitting, and forest fitting
    pub const RANDOM_SEED: u64 = 42;

    /// Default held-out fraction for evaluation
    pub const TEST_FRACTION: f64 = 0.2;

    /// Default number of trees in the forest
    pub const N_ESTIMATORS: usize = 100;
}

/// Service names for structured logging
pub mod service_names {
    /// Prediction service name
    pub const NUTRITION_COACH_SERVER: &str = "nutrition-coach-server";

    /// Offline training job name
    pub const TRAIN_MODEL: &str = "train-model";
}
