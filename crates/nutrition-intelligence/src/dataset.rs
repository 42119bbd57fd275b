// ABOUTME: Training set assembly from labeled profiles using the shared feature encoder
// ABOUTME: Seeded shuffle split into train and held-out test partitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use nutrition_core::constants::features::FEATURE_COUNT;
use nutrition_core::constants::targets::TARGET_COUNT;
use nutrition_core::features::encode;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{ModelError, ModelResult};
use crate::forest::DenseMatrix;
use crate::synthetic::LabeledProfile;

/// Feature matrix and aligned target matrix
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSet {
    features: DenseMatrix,
    targets: DenseMatrix,
}

impl TrainingSet {
    /// Encode labeled profiles row by row
    ///
    /// # Errors
    ///
    /// Returns `EmptyDataset` for an empty slice
    pub fn from_labeled(profiles: &[LabeledProfile]) -> ModelResult<Self> {
        if profiles.is_empty() {
            return Err(ModelError::EmptyDataset);
        }

        let mut features = DenseMatrix::with_capacity(profiles.len(), FEATURE_COUNT);
        let mut targets = DenseMatrix::with_capacity(profiles.len(), TARGET_COUNT);
        for labeled in profiles {
            features.push_row(encode(&labeled.profile).as_slice())?;
            targets.push_row(&labeled.label.targets.to_array())?;
        }
        Ok(Self { features, targets })
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.n_rows()
    }

    /// Whether there are no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature matrix
    #[must_use]
    pub const fn features(&self) -> &DenseMatrix {
        &self.features
    }

    /// Target matrix
    #[must_use]
    pub const fn targets(&self) -> &DenseMatrix {
        &self.targets
    }

    /// Shuffle with `seed` and hold out `ceil(len * test_fraction)` rows
    ///
    /// Returns `(train, test)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless both partitions end up non-empty
    pub fn split(&self, test_fraction: f64, seed: u64) -> ModelResult<(Self, Self)> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(ModelError::InvalidParameter(format!(
                "test fraction must be in (0, 1), got {test_fraction}"
            )));
        }
        let n = self.len();
        let n_test = (n as f64 * test_fraction).ceil() as usize;
        if n_test == 0 || n_test >= n {
            return Err(ModelError::InvalidParameter(format!(
                "cannot hold out {n_test} of {n} rows"
            )));
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
        let (test_rows, train_rows) = order.split_at(n_test);

        Ok((self.select(train_rows), self.select(test_rows)))
    }

    fn select(&self, rows: &[usize]) -> Self {
        Self {
            features: self.features.select_rows(rows),
            targets: self.targets.select_rows(rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelConfig;
    use crate::synthetic::generate_profiles;

    fn set(n: usize) -> ModelResult<TrainingSet> {
        TrainingSet::from_labeled(&generate_profiles(n, 42, &LabelConfig::default())?)
    }

    #[test]
    fn test_shapes_follow_shared_columns() -> ModelResult<()> {
        let data = set(25)?;
        assert_eq!(data.len(), 25);
        assert_eq!(data.features().n_cols(), FEATURE_COUNT);
        assert_eq!(data.targets().n_cols(), TARGET_COUNT);
        Ok(())
    }

    #[test]
    fn test_split_sizes_use_ceiling() -> ModelResult<()> {
        let (train, test) = set(101)?.split(0.2, 42)?;
        assert_eq!(test.len(), 21);
        assert_eq!(train.len(), 80);
        Ok(())
    }

    #[test]
    fn test_split_is_seeded() -> ModelResult<()> {
        let data = set(40)?;
        assert_eq!(data.split(0.25, 9)?, data.split(0.25, 9)?);
        assert_ne!(data.split(0.25, 9)?.1, data.split(0.25, 10)?.1);
        Ok(())
    }

    #[test]
    fn test_invalid_fractions_rejected() -> ModelResult<()> {
        let data = set(10)?;
        assert!(data.split(0.0, 1).is_err());
        assert!(data.split(1.0, 1).is_err());
        assert!(data.split(f64::NAN, 1).is_err());
        assert!(set(1)?.split(0.5, 1).is_err());
        Ok(())
    }
}
