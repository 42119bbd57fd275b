// ABOUTME: Core domain models for nutrition target prediction
// ABOUTME: Profile input entity and NutritionalTargets output entity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod profile;

pub use profile::{ActivityLevel, Gender, Goal, Profile, ProfileRequest};

use serde::{Deserialize, Serialize};

use crate::constants::targets::TARGET_COUNT;

/// Daily nutritional targets
///
/// No cross-field invariant is enforced: macro calories need not sum to the
/// calorie total when the values come from the regression model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionalTargets {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrates in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
}

impl NutritionalTargets {
    /// Values in model output order (see `TARGET_COLUMNS`)
    #[must_use]
    pub const fn to_array(self) -> [f64; TARGET_COUNT] {
        [self.calories, self.protein, self.carbs, self.fat]
    }

    /// Build from values in model output order
    #[must_use]
    pub const fn from_array(values: [f64; TARGET_COUNT]) -> Self {
        Self {
            calories: values[0],
            protein: values[1],
            carbs: values[2],
            fat: values[3],
        }
    }

    /// Energy implied by the macro grams (4/4/9 kcal per gram)
    #[must_use]
    pub fn macro_calories(&self) -> f64 {
        self.fat.mul_add(9.0, self.protein.mul_add(4.0, self.carbs * 4.0))
    }
}
