// ABOUTME: Random forest regressor mapping feature vectors to nutritional targets
// ABOUTME: Bootstrap-sampled multi-output trees fitted in parallel with per-tree seeded RNGs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Random Forest Regressor
//!
//! Each tree is grown on a bootstrap sample (drawn with replacement, same size
//! as the training set) and the forest predicts the element-wise mean of the
//! leaf vectors its trees reach.
//!
//! Tree `i` draws from `ChaCha8Rng::seed_from_u64(seed)` on stream `i`, so the
//! fitted forest depends only on the data and the parameters, never on how
//! rayon schedules the work.

mod artifact;
mod matrix;
mod tree;

pub use artifact::{ModelArtifact, ARTIFACT_FORMAT_VERSION};
pub use matrix::DenseMatrix;
pub use tree::{NodeId, RegressionTree, TreeParams};

use nutrition_core::constants::targets::TARGET_COUNT;
use nutrition_core::features::FeatureVector;
use nutrition_core::models::NutritionalTargets;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ModelError, ModelResult};

/// Hyper-parameters of the forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees
    pub n_estimators: usize,
    /// Per-tree growth limits
    pub tree: TreeParams,
    /// Draw a bootstrap sample per tree; otherwise every tree sees all rows
    pub bootstrap: bool,
    /// Base seed for every tree's RNG
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            tree: TreeParams::default(),
            bootstrap: true,
            seed: 42,
        }
    }
}

impl ForestParams {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the offending parameter
    pub fn validate(&self) -> ModelResult<()> {
        if self.n_estimators == 0 {
            return Err(ModelError::InvalidParameter(
                "n_estimators must be at least 1".into(),
            ));
        }
        if self.tree.min_samples_split < 2 {
            return Err(ModelError::InvalidParameter(format!(
                "min_samples_split must be at least 2, got {}",
                self.tree.min_samples_split
            )));
        }
        if self.tree.min_samples_leaf == 0 {
            return Err(ModelError::InvalidParameter(
                "min_samples_leaf must be at least 1".into(),
            ));
        }
        if self.tree.max_features == Some(0) {
            return Err(ModelError::InvalidParameter(
                "max_features must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Fitted random forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    n_features: usize,
    n_outputs: usize,
    params: ForestParams,
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Fit a forest on `features` (rows x features) against `targets` (rows x outputs)
    ///
    /// # Errors
    ///
    /// Returns an error for empty or mismatched inputs and invalid parameters
    pub fn fit(
        features: &DenseMatrix,
        targets: &DenseMatrix,
        params: &ForestParams,
    ) -> ModelResult<Self> {
        params.validate()?;
        let n_rows = features.n_rows();
        if n_rows == 0 || features.n_cols() == 0 || targets.n_cols() == 0 {
            return Err(ModelError::EmptyDataset);
        }
        if targets.n_rows() != n_rows {
            return Err(ModelError::ShapeMismatch {
                expected: n_rows,
                actual: targets.n_rows(),
            });
        }

        info!(
            n_estimators = params.n_estimators,
            n_rows,
            n_features = features.n_cols(),
            n_outputs = targets.n_cols(),
            "Fitting random forest"
        );

        let trees = (0..params.n_estimators)
            .into_par_iter()
            .map(|tree_index| {
                let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
                rng.set_stream(tree_index as u64);

                let sample: Vec<usize> = if params.bootstrap {
                    (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect()
                } else {
                    (0..n_rows).collect()
                };
                let tree = RegressionTree::fit(features, targets, sample, &params.tree, &mut rng)?;
                debug!(
                    tree_index,
                    nodes = tree.n_nodes(),
                    depth = tree.depth(),
                    "Tree fitted"
                );
                Ok(tree)
            })
            .collect::<ModelResult<Vec<_>>>()?;

        Ok(Self {
            n_features: features.n_cols(),
            n_outputs: targets.n_cols(),
            params: *params,
            trees,
        })
    }

    /// Predict one row
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the row width differs from the training width
    pub fn predict_row(&self, row: &[f64]) -> ModelResult<Vec<f64>> {
        if row.len() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                actual: row.len(),
            });
        }

        let mut output = vec![0.0; self.n_outputs];
        for tree in &self.trees {
            for (acc, value) in output.iter_mut().zip(tree.predict_row(row)) {
                *acc += value;
            }
        }
        let n_trees = self.trees.len() as f64;
        for acc in &mut output {
            *acc /= n_trees;
        }
        Ok(output)
    }

    /// Predict every row of a matrix, in parallel
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the column count differs from the training width
    pub fn predict(&self, features: &DenseMatrix) -> ModelResult<DenseMatrix> {
        if features.n_cols() != self.n_features {
            return Err(ModelError::ShapeMismatch {
                expected: self.n_features,
                actual: features.n_cols(),
            });
        }
        let rows = (0..features.n_rows())
            .into_par_iter()
            .map(|index| self.predict_row(features.row(index)))
            .collect::<ModelResult<Vec<_>>>()?;

        let mut predictions = DenseMatrix::with_capacity(rows.len(), self.n_outputs);
        for row in &rows {
            predictions.push_row(row)?;
        }
        Ok(predictions)
    }

    /// Predict nutritional targets for an encoded profile
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the forest was not trained on the shared
    /// feature layout or does not produce the four target outputs
    pub fn predict_targets(&self, features: &FeatureVector) -> ModelResult<NutritionalTargets> {
        let output = self.predict_row(features.as_slice())?;
        let values: [f64; TARGET_COUNT] =
            output
                .try_into()
                .map_err(|values: Vec<f64>| ModelError::ShapeMismatch {
                    expected: TARGET_COUNT,
                    actual: values.len(),
                })?;
        Ok(NutritionalTargets::from_array(values))
    }

    /// Structural checks for a deserialized forest
    ///
    /// # Errors
    ///
    /// Returns the first tree defect or a width inconsistency
    pub fn validate(&self) -> ModelResult<()> {
        if self.trees.is_empty() {
            return Err(ModelError::InvalidParameter("forest has no trees".into()));
        }
        for tree in &self.trees {
            tree.validate()?;
            if tree.n_outputs() != self.n_outputs {
                return Err(ModelError::ShapeMismatch {
                    expected: self.n_outputs,
                    actual: tree.n_outputs(),
                });
            }
            if let Some(max) = tree.max_feature_index() {
                if max >= self.n_features {
                    return Err(ModelError::ShapeMismatch {
                        expected: self.n_features,
                        actual: max + 1,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of input features
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of outputs per prediction
    #[must_use]
    pub const fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    /// Number of trees
    #[must_use]
    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Total node count across all trees
    #[must_use]
    pub fn total_nodes(&self) -> usize {
        self.trees.iter().map(RegressionTree::n_nodes).sum()
    }

    /// Parameters the forest was fitted with
    #[must_use]
    pub const fn params(&self) -> &ForestParams {
        &self.params
    }

    /// Fitted trees
    #[must_use]
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }
}
