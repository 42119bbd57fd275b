// ABOUTME: Process-wide handle to the regression model loaded once at startup
// ABOUTME: Either a ready forest shared behind Arc or an unavailable state with its reason
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Model handle
//!
//! The artifact is read exactly once. A missing, corrupt, or schema-mismatched
//! artifact does not stop the server: the handle records why and every
//! prediction is answered with `MODEL_UNAVAILABLE` while the health probe keeps
//! reporting ok.

use nutrition_core::errors::{AppError, AppResult};
use nutrition_intelligence::{ModelArtifact, RandomForest};
use std::path::Path;
use std::sync::Arc;

use crate::logging::AppLogger;

/// Immutable model state
#[derive(Debug, Clone)]
pub enum ModelHandle {
    /// Model loaded and verified
    Ready(Arc<RandomForest>),
    /// No usable model
    Unavailable {
        /// Why loading failed
        reason: String,
    },
}

impl ModelHandle {
    /// Load and verify the artifact at `path`
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match ModelArtifact::load(path) {
            Ok(artifact) => {
                let forest = artifact.into_forest();
                AppLogger::log_model_load(path, Ok((forest.n_trees(), forest.total_nodes())));
                Self::Ready(Arc::new(forest))
            }
            Err(error) => {
                let reason = error.to_string();
                AppLogger::log_model_load(path, Err(&reason));
                Self::Unavailable { reason }
            }
        }
    }

    /// Wrap an in-memory forest
    #[must_use]
    pub fn from_forest(forest: RandomForest) -> Self {
        Self::Ready(Arc::new(forest))
    }

    /// Handle that never serves predictions
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// The loaded forest
    ///
    /// # Errors
    ///
    /// Returns `MODEL_UNAVAILABLE` when no model is loaded
    pub fn model(&self) -> AppResult<&Arc<RandomForest>> {
        match self {
            Self::Ready(forest) => Ok(forest),
            Self::Unavailable { reason } => Err(AppError::model_unavailable(reason.clone())),
        }
    }

    /// Whether predictions can be served
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Failure reason when unavailable
    #[must_use]
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable { reason } => Some(reason),
        }
    }
}
