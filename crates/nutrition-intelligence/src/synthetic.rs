// ABOUTME: Synthetic profile generator producing labeled training examples
// ABOUTME: Seeded sampling of demographics followed by the ground-truth nutrition formulas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Synthetic label generation.
//!
//! Sampling distributions:
//! - age: uniform integer in `[18, 70]` (artifacts trained with numpy's
//!   `randint(18, 70)` only ever saw ages 18 to 69)
//! - height: uniform real in `[150, 200)` cm
//! - weight: uniform real in `[50, 120)` kg
//! - gender: Male 0.48, Female 0.48, Other 0.04
//! - activity level and goal: uniform over their four values
//!
//! Every sample is labeled with [`calculate_label`]. The generator is an
//! iterator seeded with `ChaCha8Rng`, so a seed fully determines the dataset.

use nutrition_core::models::{ActivityLevel, Gender, Goal, Profile};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::ops::{Range, RangeInclusive};

use crate::config::LabelConfig;
use crate::error::{ModelError, ModelResult};
use crate::nutrition_calculator::{calculate_label, NutritionLabel};

/// Age range sampled (years, inclusive)
pub const AGE_RANGE: RangeInclusive<u32> = 18..=70;
/// Height range sampled (cm)
pub const HEIGHT_RANGE_CM: Range<f64> = 150.0..200.0;
/// Weight range sampled (kg)
pub const WEIGHT_RANGE_KG: Range<f64> = 50.0..120.0;
/// Gender sampling weights, aligned with [`Gender::ALL`]
pub const GENDER_WEIGHTS: [f64; 3] = [0.48, 0.48, 0.04];

/// A profile together with its ground-truth label
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabeledProfile {
    /// Sampled profile
    pub profile: Profile,
    /// Formula output for the profile
    pub label: NutritionLabel,
}

/// Seeded, infinite iterator of labeled synthetic profiles
pub struct SyntheticProfileGenerator {
    rng: ChaCha8Rng,
    gender_distribution: WeightedIndex<f64>,
    config: LabelConfig,
}

impl SyntheticProfileGenerator {
    /// Create a generator for a seed and label configuration
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidParameter` if the label configuration is invalid
    pub fn new(seed: u64, config: LabelConfig) -> ModelResult<Self> {
        config
            .validate()
            .map_err(|e| ModelError::InvalidParameter(e.to_string()))?;
        let gender_distribution = WeightedIndex::new(GENDER_WEIGHTS)
            .map_err(|e| ModelError::InvalidParameter(format!("gender weights: {e}")))?;

        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            gender_distribution,
            config,
        })
    }

    /// Draw one profile without labeling it
    pub fn sample_profile(&mut self) -> Profile {
        let age = self.rng.gen_range(AGE_RANGE);
        let height = self.rng.gen_range(HEIGHT_RANGE_CM);
        let weight = self.rng.gen_range(WEIGHT_RANGE_KG);
        let gender = Gender::ALL[self.gender_distribution.sample(&mut self.rng)];
        let activity_level = *ActivityLevel::ALL
            .choose(&mut self.rng)
            .unwrap_or(&ActivityLevel::Sedentary);
        let goal = *Goal::ALL.choose(&mut self.rng).unwrap_or(&Goal::WeightLoss);

        Profile {
            age,
            height,
            weight,
            gender,
            activity_level,
            goal,
        }
    }
}

impl Iterator for SyntheticProfileGenerator {
    type Item = LabeledProfile;

    fn next(&mut self) -> Option<LabeledProfile> {
        let profile = self.sample_profile();
        let label = calculate_label(&profile, &self.config);
        Some(LabeledProfile { profile, label })
    }
}

/// Generate `count` labeled profiles
///
/// # Errors
///
/// Returns an error if `count` is zero or the configuration is invalid
pub fn generate_profiles(
    count: usize,
    seed: u64,
    config: &LabelConfig,
) -> ModelResult<Vec<LabeledProfile>> {
    if count == 0 {
        return Err(ModelError::EmptyDataset);
    }

    tracing::info!(count, seed, "Generating synthetic profiles");
    let profiles: Vec<_> = SyntheticProfileGenerator::new(seed, config.clone())?
        .take(count)
        .collect();

    let clamped = profiles.iter().filter(|p| p.label.clamped).count();
    tracing::info!(count, clamped, "Synthetic data generation complete");
    Ok(profiles)
}
