// ABOUTME: Label-generation configuration for synthetic nutrition targets
// ABOUTME: Harris-Benedict coefficients, activity factors, goal offsets, and macro splits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Label Generation Configuration
//!
//! Holds every constant the synthetic ground-truth function depends on.
//! Defaults reproduce the table the model was designed around; changing them
//! changes the training labels, so artifacts trained under different values
//! are not comparable.
//!
//! # Scientific References
//!
//! - BMR: Roza, A.M., & Shizgal, H.M. (1984). The Harris Benedict equation reevaluated.
//!   *American Journal of Clinical Nutrition*, 40(1), 168-182.
//! - Activity factors: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology

mod error;

pub use error::ConfigError;

use nutrition_core::models::{ActivityLevel, Goal};
use serde::{Deserialize, Serialize};

/// Complete label-generation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelConfig {
    /// BMR equation coefficients
    pub bmr: HarrisBenedictConfig,
    /// Activity multipliers for TDEE
    pub activity_factors: ActivityFactorsConfig,
    /// Goal-specific calorie offsets and the safety floor
    pub goal_calories: GoalCaloriesConfig,
    /// Goal-specific macro percentage splits
    pub macro_splits: MacroSplitConfig,
}

impl LabelConfig {
    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns the first section error encountered
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.activity_factors.validate()?;
        self.goal_calories.validate()?;
        self.macro_splits.validate()
    }
}

/// Coefficients of one linear BMR equation
///
/// `BMR = constant + weight_coef * kg + height_coef * cm + age_coef * years`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BmrEquation {
    /// Intercept (kcal/day)
    pub constant: f64,
    /// Weight coefficient (kcal per kg)
    pub weight_coef: f64,
    /// Height coefficient (kcal per cm)
    pub height_coef: f64,
    /// Age coefficient (kcal per year, negative)
    pub age_coef: f64,
}

/// Revised Harris-Benedict equations (Roza & Shizgal 1984)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarrisBenedictConfig {
    /// Male equation: 88.362 + 13.397w + 4.799h - 5.677a
    pub male: BmrEquation,
    /// Female equation: 447.593 + 9.247w + 3.098h - 4.330a
    pub female: BmrEquation,
}

impl Default for HarrisBenedictConfig {
    fn default() -> Self {
        Self {
            male: BmrEquation {
                constant: 88.362,
                weight_coef: 13.397,
                height_coef: 4.799,
                age_coef: -5.677,
            },
            female: BmrEquation {
                constant: 447.593,
                weight_coef: 9.247,
                height_coef: 3.098,
                age_coef: -4.330,
            },
        }
    }
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary (little/no exercise): 1.2
    pub sedentary: f64,
    /// Lightly active (1-3 days/week): 1.375
    pub lightly_active: f64,
    /// Moderately active (3-5 days/week): 1.55
    pub moderately_active: f64,
    /// Very active (6-7 days/week): 1.725
    pub very_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
        }
    }
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::LightlyActive => self.lightly_active,
            ActivityLevel::ModeratelyActive => self.moderately_active,
            ActivityLevel::VeryActive => self.very_active,
        }
    }

    /// Validate that every factor is at least 1.0
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a factor below 1.0
    pub fn validate(&self) -> Result<(), ConfigError> {
        for level in ActivityLevel::ALL {
            let factor = self.factor(level);
            if !factor.is_finite() || factor < 1.0 {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "activity factor for '{level}' must be >= 1.0, got {factor}"
                )));
            }
        }
        Ok(())
    }
}

/// Goal-specific calorie offsets applied to TDEE, plus the safety floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalCaloriesConfig {
    /// Weight Loss: TDEE - 400
    pub weight_loss_offset: f64,
    /// Muscle Gain: TDEE + 300
    pub muscle_gain_offset: f64,
    /// Carbo-Cut Diet: TDEE - 200
    pub carbo_cut_offset: f64,
    /// Fat Cut Diet: TDEE - 300
    pub fat_cut_offset: f64,
    /// Any goal outside the table: TDEE unchanged
    pub default_offset: f64,
    /// Floor as a multiple of BMR (1.1)
    pub min_bmr_multiple: f64,
    /// Absolute floor in kcal (1200)
    pub min_calories: f64,
}

impl Default for GoalCaloriesConfig {
    fn default() -> Self {
        Self {
            weight_loss_offset: -400.0,
            muscle_gain_offset: 300.0,
            carbo_cut_offset: -200.0,
            fat_cut_offset: -300.0,
            default_offset: 0.0,
            min_bmr_multiple: 1.1,
            min_calories: 1200.0,
        }
    }
}

impl GoalCaloriesConfig {
    /// Offset for a goal; `None` selects the default offset
    #[must_use]
    pub const fn offset(&self, goal: Option<Goal>) -> f64 {
        match goal {
            Some(Goal::WeightLoss) => self.weight_loss_offset,
            Some(Goal::MuscleGain) => self.muscle_gain_offset,
            Some(Goal::CarboCut) => self.carbo_cut_offset,
            Some(Goal::FatCut) => self.fat_cut_offset,
            None => self.default_offset,
        }
    }

    /// Validate floor parameters
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValueOutOfRange` for a non-positive floor
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_calories <= 0.0 || self.min_bmr_multiple <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(format!(
                "calorie floor must be positive, got {} kcal and {}x BMR",
                self.min_calories, self.min_bmr_multiple
            )));
        }
        Ok(())
    }
}

/// Macro distribution as whole percentages of total calories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroDistribution {
    /// Protein percentage (0-100)
    pub protein_pct: u8,
    /// Carbohydrate percentage (0-100)
    pub carbs_pct: u8,
    /// Fat percentage (0-100)
    pub fat_pct: u8,
}

impl MacroDistribution {
    /// Create a new macro distribution
    ///
    /// # Panics
    ///
    /// Panics in debug mode if percentages don't sum to 100
    #[must_use]
    pub const fn new(protein_pct: u8, carbs_pct: u8, fat_pct: u8) -> Self {
        debug_assert!(
            protein_pct
                .saturating_add(carbs_pct)
                .saturating_add(fat_pct)
                == 100,
            "Macro percentages must sum to 100"
        );
        Self {
            protein_pct,
            carbs_pct,
            fat_pct,
        }
    }

    /// Sum of the three percentages
    #[must_use]
    pub const fn total(&self) -> u8 {
        self.protein_pct
            .saturating_add(self.carbs_pct)
            .saturating_add(self.fat_pct)
    }
}

/// Per-goal macro splits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroSplitConfig {
    /// Weight Loss: 40/35/25
    pub weight_loss: MacroDistribution,
    /// Muscle Gain: 45/30/25
    pub muscle_gain: MacroDistribution,
    /// Carbo-Cut Diet: 30/10/60
    pub carbo_cut: MacroDistribution,
    /// Fat Cut Diet: 35/50/15
    pub fat_cut: MacroDistribution,
    /// Any goal outside the table: 30/40/30
    pub default: MacroDistribution,
}

impl Default for MacroSplitConfig {
    fn default() -> Self {
        Self {
            // Higher protein, balanced carbs/fat
            weight_loss: MacroDistribution::new(40, 35, 25),
            // Very high protein
            muscle_gain: MacroDistribution::new(45, 30, 25),
            // Ketogenic style: very low carb, high fat
            carbo_cut: MacroDistribution::new(30, 10, 60),
            // Low fat, high carb
            fat_cut: MacroDistribution::new(35, 50, 15),
            default: MacroDistribution::new(30, 40, 30),
        }
    }
}

impl MacroSplitConfig {
    /// Split for a goal; `None` selects the default split
    #[must_use]
    pub const fn split(&self, goal: Option<Goal>) -> MacroDistribution {
        match goal {
            Some(Goal::WeightLoss) => self.weight_loss,
            Some(Goal::MuscleGain) => self.muscle_gain,
            Some(Goal::CarboCut) => self.carbo_cut,
            Some(Goal::FatCut) => self.fat_cut,
            None => self.default,
        }
    }

    /// Validate that every split sums to 100%
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidWeights` naming the first bad split
    pub fn validate(&self) -> Result<(), ConfigError> {
        let splits = [
            ("weight_loss", self.weight_loss),
            ("muscle_gain", self.muscle_gain),
            ("carbo_cut", self.carbo_cut),
            ("fat_cut", self.fat_cut),
            ("default", self.default),
        ];

        for (name, split) in splits {
            let sum = split.total();
            if sum != 100 {
                return Err(ConfigError::InvalidWeights(format!(
                    "{name} macro percentages must sum to 100, got {sum}"
                )));
            }
        }

        Ok(())
    }
}
