// ABOUTME: Versioned JSON artifact wrapping a fitted forest and its column contract
// ABOUTME: Save writes atomically; load rejects artifacts trained on a different feature order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use nutrition_core::constants::features::FEATURE_COLUMNS;
use nutrition_core::constants::targets::TARGET_COLUMNS;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::RandomForest;
use crate::error::{ModelError, ModelResult};
use crate::metrics::RegressionReport;

/// Artifact layout version this build reads and writes
pub const ARTIFACT_FORMAT_VERSION: u32 = 2;

/// Persisted model file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Layout version
    pub format_version: u32,
    /// Feature columns, in the order the forest consumes them
    pub feature_columns: Vec<String>,
    /// Target columns, in the order the forest produces them
    pub target_columns: Vec<String>,
    /// When training finished
    pub trained_at: DateTime<Utc>,
    /// Rows used for fitting
    pub training_samples: usize,
    /// Held-out evaluation, if one was run
    pub evaluation: Option<RegressionReport>,
    /// The fitted forest (hyper-parameters included)
    pub forest: RandomForest,
}

impl ModelArtifact {
    /// Wrap a forest trained on the shared feature layout
    #[must_use]
    pub fn new(
        forest: RandomForest,
        training_samples: usize,
        evaluation: Option<RegressionReport>,
    ) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_columns: FEATURE_COLUMNS.iter().map(ToString::to_string).collect(),
            target_columns: TARGET_COLUMNS.iter().map(ToString::to_string).collect(),
            trained_at: Utc::now(),
            training_samples,
            evaluation,
            forest,
        }
    }

    /// Check version, column contract, and forest structure
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedVersion`, `SchemaMismatch`, or a structural error
    pub fn verify(&self) -> ModelResult<()> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: self.format_version,
                supported: ARTIFACT_FORMAT_VERSION,
            });
        }
        verify_columns(&self.feature_columns, &FEATURE_COLUMNS)?;
        verify_columns(&self.target_columns, &TARGET_COLUMNS)?;

        if self.forest.n_features() != FEATURE_COLUMNS.len() {
            return Err(ModelError::ShapeMismatch {
                expected: FEATURE_COLUMNS.len(),
                actual: self.forest.n_features(),
            });
        }
        if self.forest.n_outputs() != TARGET_COLUMNS.len() {
            return Err(ModelError::ShapeMismatch {
                expected: TARGET_COLUMNS.len(),
                actual: self.forest.n_outputs(),
            });
        }
        self.forest.validate()
    }

    /// Write the artifact as JSON, replacing any existing file atomically
    ///
    /// # Errors
    ///
    /// Returns `Io` or `Serialization` errors
    pub fn save(&self, path: &Path) -> ModelResult<()> {
        let io_error = |source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let temp_path = path.with_extension("json.tmp");
        let file = File::create(&temp_path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush().map_err(io_error)?;
        drop(writer);
        fs::rename(&temp_path, path).map_err(io_error)?;

        info!(
            path = %path.display(),
            trees = self.forest.n_trees(),
            nodes = self.forest.total_nodes(),
            "Model artifact saved"
        );
        Ok(())
    }

    /// Read and verify an artifact
    ///
    /// # Errors
    ///
    /// Returns `Io`, `Serialization`, or any [`ModelArtifact::verify`] error
    pub fn load(path: &Path) -> ModelResult<Self> {
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: Self = serde_json::from_reader(BufReader::new(file))?;
        artifact.verify()?;
        Ok(artifact)
    }

    /// Take the forest out of the artifact
    #[must_use]
    pub fn into_forest(self) -> RandomForest {
        self.forest
    }
}

fn verify_columns(found: &[String], expected: &[&str]) -> ModelResult<()> {
    if found.iter().map(String::as_str).eq(expected.iter().copied()) {
        Ok(())
    } else {
        Err(ModelError::SchemaMismatch {
            expected: expected.iter().map(ToString::to_string).collect(),
            found: found.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::{DenseMatrix, ForestParams};
    use nutrition_core::constants::features::FEATURE_COUNT;
    use nutrition_core::constants::targets::TARGET_COUNT;

    fn tiny_forest() -> ModelResult<RandomForest> {
        let mut x = DenseMatrix::with_columns(FEATURE_COUNT);
        let mut y = DenseMatrix::with_columns(TARGET_COUNT);
        for i in 0..20 {
            let mut row = [0.0; FEATURE_COUNT];
            row[0] = f64::from(i);
            x.push_row(&row)?;
            y.push_row(&[f64::from(i) * 100.0, 1.0, 2.0, 3.0])?;
        }
        RandomForest::fit(
            &x,
            &y,
            &ForestParams {
                n_estimators: 3,
                ..ForestParams::default()
            },
        )
    }

    #[test]
    fn test_save_and_load_preserve_forest() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("models").join("model.json");
        let artifact = ModelArtifact::new(tiny_forest()?, 20, None);
        artifact.save(&path)?;

        let loaded = ModelArtifact::load(&path)?;
        assert_eq!(loaded, artifact);
        assert!(!path.with_extension("json.tmp").exists());
        Ok(())
    }

    #[test]
    fn test_reordered_columns_are_rejected() -> ModelResult<()> {
        let mut artifact = ModelArtifact::new(tiny_forest()?, 20, None);
        artifact.feature_columns.swap(3, 4);
        assert!(matches!(
            artifact.verify(),
            Err(ModelError::SchemaMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_future_version_is_rejected() -> ModelResult<()> {
        let mut artifact = ModelArtifact::new(tiny_forest()?, 20, None);
        artifact.format_version = ARTIFACT_FORMAT_VERSION + 1;
        assert!(matches!(
            artifact.verify(),
            Err(ModelError::UnsupportedVersion { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = ModelArtifact::load(Path::new("/nonexistent/model.json"));
        assert!(matches!(result, Err(ModelError::Io { .. })));
    }
}
