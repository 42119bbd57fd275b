// ABOUTME: Ground-truth nutrition formulas used to label synthetic training data
// ABOUTME: Harris-Benedict BMR, TDEE, goal calorie offsets, safety floor, and macro grams
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition Calculator Module
//!
//! Deterministic formulas that define the labels the regression model learns.
//! The pipeline per profile is:
//!
//! 1. BMR from the revised Harris-Benedict equations (mean of both for `Other`)
//! 2. TDEE = BMR x activity factor
//! 3. Goal offset added to TDEE
//! 4. Calories = max(adjusted, 1.1 x BMR, 1200 kcal)
//! 5. Macro grams from the goal's percentage split (4/4/9 kcal per gram)
//!
//! # Scientific References
//!
//! - Roza, A.M., & Shizgal, H.M. (1984). The Harris Benedict equation reevaluated.
//!   *American Journal of Clinical Nutrition*, 40(1), 168-182.
//!   <https://doi.org/10.1093/ajcn/40.1.168>

use nutrition_core::models::{ActivityLevel, Gender, Goal, NutritionalTargets, Profile};
use serde::{Deserialize, Serialize};

use crate::config::{
    ActivityFactorsConfig, BmrEquation, GoalCaloriesConfig, HarrisBenedictConfig, LabelConfig,
    MacroDistribution, MacroSplitConfig,
};

/// Energy per gram of protein (kcal)
pub const PROTEIN_KCAL_PER_G: f64 = 4.0;
/// Energy per gram of carbohydrate (kcal)
pub const CARBS_KCAL_PER_G: f64 = 4.0;
/// Energy per gram of fat (kcal)
pub const FAT_KCAL_PER_G: f64 = 9.0;

/// Every intermediate value of a label computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionLabel {
    /// Basal Metabolic Rate (kcal/day)
    pub bmr: f64,
    /// Total Daily Energy Expenditure (kcal/day)
    pub tdee: f64,
    /// TDEE after the goal offset, before the safety floor
    pub goal_adjusted_calories: f64,
    /// Whether the safety floor raised the calorie target
    pub clamped: bool,
    /// Macro split applied
    pub split: MacroDistribution,
    /// Final targets
    pub targets: NutritionalTargets,
}

impl BmrEquation {
    /// Evaluate the equation
    #[must_use]
    pub fn evaluate(&self, weight_kg: f64, height_cm: f64, age: f64) -> f64 {
        self.age_coef.mul_add(
            age,
            self.height_coef
                .mul_add(height_cm, self.weight_coef.mul_add(weight_kg, self.constant)),
        )
    }
}

/// Calculate Basal Metabolic Rate using the revised Harris-Benedict equations
///
/// - Male: 88.362 + 13.397 x `weight_kg` + 4.799 x `height_cm` - 5.677 x age
/// - Female: 447.593 + 9.247 x `weight_kg` + 3.098 x `height_cm` - 4.330 x age
/// - Other: arithmetic mean of the two equations on the same inputs
///
/// No range checks are applied here; profiles are validated upstream.
#[must_use]
pub fn calculate_harris_benedict(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    gender: Gender,
    config: &HarrisBenedictConfig,
) -> f64 {
    let age = f64::from(age);
    match gender {
        Gender::Male => config.male.evaluate(weight_kg, height_cm, age),
        Gender::Female => config.female.evaluate(weight_kg, height_cm, age),
        Gender::Other => {
            let male = config.male.evaluate(weight_kg, height_cm, age);
            let female = config.female.evaluate(weight_kg, height_cm, age);
            (male + female) / 2.0
        }
    }
}

/// Calculate Total Daily Energy Expenditure
///
/// Formula: TDEE = BMR x Activity Factor
#[must_use]
pub fn calculate_tdee(
    bmr: f64,
    activity_level: ActivityLevel,
    config: &ActivityFactorsConfig,
) -> f64 {
    bmr * config.factor(activity_level)
}

/// Apply the goal offset to TDEE
///
/// `None` stands for a goal outside the table and leaves TDEE unchanged.
#[must_use]
pub fn goal_adjusted_calories(tdee: f64, goal: Option<Goal>, config: &GoalCaloriesConfig) -> f64 {
    tdee + config.offset(goal)
}

/// Apply the safety floor: max(calories, 1.1 x BMR, 1200)
#[must_use]
pub fn apply_calorie_floor(calories: f64, bmr: f64, config: &GoalCaloriesConfig) -> f64 {
    calories
        .max(bmr * config.min_bmr_multiple)
        .max(config.min_calories)
}

/// Convert a calorie total into macro grams using a percentage split
#[must_use]
pub fn macro_grams(calories: f64, split: MacroDistribution) -> NutritionalTargets {
    let share = |pct: u8| calories * f64::from(pct) / 100.0;
    NutritionalTargets {
        calories,
        protein: share(split.protein_pct) / PROTEIN_KCAL_PER_G,
        carbs: share(split.carbs_pct) / CARBS_KCAL_PER_G,
        fat: share(split.fat_pct) / FAT_KCAL_PER_G,
    }
}

/// Split lookup helper mirroring [`goal_adjusted_calories`]
#[must_use]
pub const fn macro_split(goal: Option<Goal>, config: &MacroSplitConfig) -> MacroDistribution {
    config.split(goal)
}

/// Calculate the complete label for a profile
#[must_use]
pub fn calculate_label(profile: &Profile, config: &LabelConfig) -> NutritionLabel {
    calculate_label_for_goal(profile, Some(profile.goal), config)
}

/// Calculate the label with an explicit (possibly unrecognized) goal
#[must_use]
pub fn calculate_label_for_goal(
    profile: &Profile,
    goal: Option<Goal>,
    config: &LabelConfig,
) -> NutritionLabel {
    // Step 1: BMR
    let bmr = calculate_harris_benedict(
        profile.weight,
        profile.height,
        profile.age,
        profile.gender,
        &config.bmr,
    );

    // Step 2: TDEE
    let tdee = calculate_tdee(bmr, profile.activity_level, &config.activity_factors);

    // Step 3: goal offset, then the floor
    let adjusted = goal_adjusted_calories(tdee, goal, &config.goal_calories);
    let calories = apply_calorie_floor(adjusted, bmr, &config.goal_calories);

    // Step 4: macro grams
    let split = macro_split(goal, &config.macro_splits);

    NutritionLabel {
        bmr,
        tdee,
        goal_adjusted_calories: adjusted,
        clamped: calories > adjusted,
        split,
        targets: macro_grams(calories, split),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn profile(gender: Gender, level: ActivityLevel, goal: Goal) -> Profile {
        Profile {
            age: 30,
            height: 180.0,
            weight: 80.0,
            gender,
            activity_level: level,
            goal,
        }
    }

    #[test]
    fn test_male_bmr_matches_reference() {
        let bmr = calculate_harris_benedict(
            80.0,
            180.0,
            30,
            Gender::Male,
            &HarrisBenedictConfig::default(),
        );
        assert!((bmr - 1853.632).abs() < EPS, "bmr = {bmr}");
    }

    #[test]
    fn test_female_bmr_matches_reference() {
        // 447.593 + 9.247*60 + 3.098*165 - 4.330*40
        let bmr = calculate_harris_benedict(
            60.0,
            165.0,
            40,
            Gender::Female,
            &HarrisBenedictConfig::default(),
        );
        assert!((bmr - 1340.383).abs() < EPS, "bmr = {bmr}");
    }

    #[test]
    fn test_other_bmr_is_mean_of_equations() {
        let config = HarrisBenedictConfig::default();
        let male = calculate_harris_benedict(70.0, 170.0, 45, Gender::Male, &config);
        let female = calculate_harris_benedict(70.0, 170.0, 45, Gender::Female, &config);
        let other = calculate_harris_benedict(70.0, 170.0, 45, Gender::Other, &config);
        assert!((other - (male + female) / 2.0).abs() < EPS);
    }

    #[test]
    fn test_muscle_gain_reference_scenario() {
        let label = calculate_label(
            &profile(Gender::Male, ActivityLevel::ModeratelyActive, Goal::MuscleGain),
            &LabelConfig::default(),
        );
        // 88.362 + 13.397*80 + 4.799*180 - 5.677*30
        assert!((label.bmr - 1853.632).abs() < EPS);
        assert!((label.tdee - 2873.1296).abs() < 1e-3);
        assert!((label.targets.calories - 3173.1296).abs() < 1e-3);
        assert!(!label.clamped);
        assert!((label.targets.protein - 356.9771).abs() < 1e-3);
        assert!((label.targets.carbs - 237.9847).abs() < 1e-3);
        assert!((label.targets.fat - 88.1425).abs() < 1e-3);
    }

    #[test]
    fn test_floor_applies_for_small_sedentary_weight_loss() {
        let small = Profile {
            age: 69,
            height: 150.0,
            weight: 50.0,
            gender: Gender::Female,
            activity_level: ActivityLevel::Sedentary,
            goal: Goal::WeightLoss,
        };
        let label = calculate_label(&small, &LabelConfig::default());
        assert!(label.clamped);
        assert!(label.targets.calories >= 1200.0);
        assert!(label.targets.calories >= 1.1 * label.bmr - EPS);
    }

    #[test]
    fn test_unrecognized_goal_uses_default_offset_and_split() {
        let base = profile(Gender::Male, ActivityLevel::Sedentary, Goal::FatCut);
        let label = calculate_label_for_goal(&base, None, &LabelConfig::default());
        assert!((label.goal_adjusted_calories - label.tdee).abs() < EPS);
        assert_eq!(label.split, MacroDistribution::new(30, 40, 30));
    }

    #[test]
    fn test_macro_grams_reconstruct_calories() {
        let targets = macro_grams(2000.0, MacroDistribution::new(30, 10, 60));
        assert!((targets.macro_calories() - 2000.0).abs() < EPS);
        assert!((targets.carbs - 50.0).abs() < EPS);
    }
}
