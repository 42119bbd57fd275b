// ABOUTME: Error types for dataset preparation, forest training, and artifact persistence
// ABOUTME: Converts into the unified AppError at the service boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrition_core::errors::{AppError, ErrorCode};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the model layer
#[derive(Debug, Error)]
pub enum ModelError {
    /// Training was requested on zero rows
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Row width does not match what the model expects
    #[error("Shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch {
        /// Expected column count
        expected: usize,
        /// Provided column count
        actual: usize,
    },

    /// A hyper-parameter or option is outside its valid range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Artifact was trained against a different feature column order
    #[error("Artifact feature columns do not match the encoder: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        /// Columns the encoder produces
        expected: Vec<String>,
        /// Columns recorded in the artifact
        found: Vec<String>,
    },

    /// Artifact format version is not supported
    #[error("Unsupported artifact format version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the file
        found: u32,
        /// Version this build reads
        supported: u32,
    },

    /// Reading or writing the artifact failed
    #[error("Artifact I/O failed for {path}: {source}")]
    Io {
        /// Artifact path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Artifact (de)serialization failed
    #[error("Artifact serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for the model layer
pub type ModelResult<T> = Result<T, ModelError>;

impl From<ModelError> for AppError {
    fn from(error: ModelError) -> Self {
        let code = match &error {
            ModelError::EmptyDataset | ModelError::InvalidParameter(_) => ErrorCode::InvalidInput,
            ModelError::ShapeMismatch { .. } => ErrorCode::PredictionFailed,
            ModelError::SchemaMismatch { .. } | ModelError::UnsupportedVersion { .. } => {
                ErrorCode::ConfigInvalid
            }
            ModelError::Io { .. } => ErrorCode::StorageError,
            ModelError::Serialization(_) => ErrorCode::SerializationError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
