// ABOUTME: Nutrition intelligence crate: label formulas, training data, random forest, adaptation
// ABOUTME: Everything the offline trainer and the prediction service compute lives here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Intelligence
//!
//! Algorithms behind the nutrition coach.
//!
//! ## Modules
//!
//! - **config**: Typed constants of the ground-truth label formulas
//! - **`nutrition_calculator`**: BMR, TDEE, goal offsets, safety floor, macro grams
//! - **synthetic**: Seeded synthetic profile generator
//! - **dataset**: Feature/target matrices and the train/test split
//! - **forest**: Multi-output random forest and its persisted artifact
//! - **metrics**: Held-out regression metrics
//! - **training**: End-to-end offline training pipeline
//! - **adaptation**: Feedback-driven target adjustments

/// Label-generation configuration
pub mod config;

/// Ground-truth nutrition formulas
pub mod nutrition_calculator;

/// Synthetic training data
pub mod synthetic;

/// Training set assembly and splitting
pub mod dataset;

/// Random forest regressor
pub mod forest;

/// Regression metrics
pub mod metrics;

/// Offline training pipeline
pub mod training;

/// Feedback adaptation engine
pub mod adaptation;

/// Model-layer errors
pub mod error;

pub use adaptation::{calculate_adjustments, DailyFeedback, TargetAdjustments};
pub use error::{ModelError, ModelResult};
pub use forest::{ForestParams, ModelArtifact, RandomForest};
pub use nutrition_calculator::{calculate_label, NutritionLabel};
pub use synthetic::{generate_profiles, LabeledProfile};
