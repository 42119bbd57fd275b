// ABOUTME: Integration tests for persisting the model and loading it into the service handle
// ABOUTME: Round trip through the filesystem plus rejection of drifted or corrupt artifacts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{quick_training_options, small_forest};
use nutrition_coach::model::ModelHandle;
use nutrition_core::features::encode;
use nutrition_core::models::{ActivityLevel, Gender, Goal, Profile};
use nutrition_intelligence::training::run_training;
use nutrition_intelligence::ModelArtifact;
use serde_json::Value;
use std::error::Error;
use std::fs;

fn sample_profile() -> Profile {
    Profile {
        age: 52,
        height: 164.0,
        weight: 71.5,
        gender: Gender::Female,
        activity_level: ActivityLevel::LightlyActive,
        goal: Goal::CarboCut,
    }
}

#[test]
fn test_saved_model_predicts_identically_after_reload() -> Result<(), Box<dyn Error>> {
    let forest = small_forest();
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested/model.json");
    ModelArtifact::new(forest.clone(), 800, None).save(&path)?;

    let handle = ModelHandle::load(&path);
    assert!(handle.is_loaded());

    let features = encode(&sample_profile());
    let before = forest.predict_targets(&features)?;
    let after = handle.model()?.predict_targets(&features)?;
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn test_training_run_writes_evaluation() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("model.json");
    let summary = run_training(&quick_training_options(), &path)?;

    let artifact = ModelArtifact::load(&path)?;
    let evaluation = artifact.evaluation.ok_or("missing evaluation")?;
    assert_eq!(evaluation.n_samples, summary.test_rows);
    assert_eq!(evaluation.targets.len(), 4);
    assert!(evaluation.mse.is_finite());
    Ok(())
}

#[test]
fn test_reordered_feature_columns_make_model_unavailable() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("model.json");
    ModelArtifact::new(small_forest(), 800, None).save(&path)?;

    let mut raw: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let columns = raw["feature_columns"]
        .as_array_mut()
        .ok_or("feature_columns is not an array")?;
    columns.swap(3, 4);
    fs::write(&path, serde_json::to_vec(&raw)?)?;

    let handle = ModelHandle::load(&path);
    assert!(!handle.is_loaded());
    assert!(handle.unavailable_reason().is_some());
    Ok(())
}

#[test]
fn test_future_format_version_is_rejected() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("model.json");
    ModelArtifact::new(small_forest(), 800, None).save(&path)?;

    let mut raw: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
    raw["format_version"] = Value::from(99);
    fs::write(&path, serde_json::to_vec(&raw)?)?;

    assert!(!ModelHandle::load(&path).is_loaded());
    Ok(())
}
