// ABOUTME: Feedback adaptation engine nudging nutrition targets from daily check-ins
// ABOUTME: Averages satiety, energy, and adherence scores and applies first-match rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Adaptation Engine
//!
//! Turns recent daily feedback (scores on a 1-5 scale) into small target
//! deltas. Rules are evaluated on the per-field averages, first match wins:
//!
//! 1. Fewer than the minimum number of days: no change
//! 2. Low adherence: no change, so the user can build consistency
//! 3. Low energy: add calories
//! 4. Low satiety: add protein plus the calories that protein carries
//! 5. High energy and high satiety: no change, positive message
//! 6. Otherwise: no change

use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::models::NutritionalTargets;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::nutrition_calculator::PROTEIN_KCAL_PER_G;

/// Lowest valid feedback score
pub const MIN_SCORE: f64 = 1.0;
/// Highest valid feedback score
pub const MAX_SCORE: f64 = 5.0;

/// One day of user feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyFeedback {
    /// Fullness after meals (1 = very hungry, 5 = very full)
    pub satiety: f64,
    /// Energy through the day
    pub energy: f64,
    /// How closely the plan was followed
    pub adherence: f64,
}

impl DailyFeedback {
    /// Check every score lies in `[1, 5]`; `index` locates the entry in error details
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` naming the first offending field
    pub fn validate(&self, index: usize) -> AppResult<()> {
        for (name, score) in [
            ("satiety", self.satiety),
            ("energy", self.energy),
            ("adherence", self.adherence),
        ] {
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(AppError::field_out_of_range(
                    &format!("feedback[{index}].{name}"),
                    "between 1 and 5",
                    score,
                ));
            }
        }
        Ok(())
    }
}

/// Validate a whole feedback history
///
/// # Errors
///
/// Returns the first out-of-range score
pub fn validate_feedback(history: &[DailyFeedback]) -> AppResult<()> {
    history
        .iter()
        .enumerate()
        .try_for_each(|(index, day)| day.validate(index))
}

/// Thresholds and step sizes of the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationConfig {
    /// Average below this counts as low (2.5)
    pub low_score_threshold: f64,
    /// Average above this counts as high (4.0)
    pub high_score_threshold: f64,
    /// Calorie step for low energy (100 kcal)
    pub calorie_step: f64,
    /// Protein step for low satiety (15 g)
    pub protein_step: f64,
    /// Days of feedback required before any rule runs (3)
    pub minimum_feedback_days: usize,
}

impl Default for AdaptationConfig {
    fn default() -> Self {
        Self {
            low_score_threshold: 2.5,
            high_score_threshold: 4.0,
            calorie_step: 100.0,
            protein_step: 15.0,
            minimum_feedback_days: 3,
        }
    }
}

/// Rule that produced an adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationRule {
    /// Not enough days of feedback
    InsufficientData,
    /// Adherence is low; targets held
    LowAdherence,
    /// Energy is low; calories raised
    LowEnergy,
    /// Satiety is low; protein raised
    LowSatiety,
    /// Energy and satiety both high; targets held
    ConsistentlyPositive,
    /// Nothing triggered; targets held
    Steady,
}

impl AdaptationRule {
    /// User-facing explanation
    #[must_use]
    pub fn reason(self, config: &AdaptationConfig) -> String {
        let text = match self {
            Self::InsufficientData => {
                return format!(
                    "We need at least {} days of feedback to make smart adjustments. \
                     Keep up the great work!",
                    config.minimum_feedback_days
                );
            }
            Self::LowAdherence => {
                "We've noticed sticking to the plan has been a challenge. To help build consistency, we're keeping your targets the same for now."
            }
            Self::LowEnergy => {
                "Your energy levels seem a bit low. We're adding some calories to help fuel your day."
            }
            Self::LowSatiety => {
                "To help with recent feelings of hunger, we've increased your protein and overall calories slightly."
            }
            Self::ConsistentlyPositive => {
                "You're doing great! Your feedback is consistently positive, so we're maintaining your current targets."
            }
            Self::Steady => "Your plan is working well. We're keeping your targets consistent.",
        };
        text.to_owned()
    }
}

/// Mean scores over a feedback history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackAverages {
    /// Mean satiety
    pub satiety: f64,
    /// Mean energy
    pub energy: f64,
    /// Mean adherence
    pub adherence: f64,
}

impl FeedbackAverages {
    /// Averages, or `None` for an empty history
    #[must_use]
    pub fn from_history(history: &[DailyFeedback]) -> Option<Self> {
        if history.is_empty() {
            return None;
        }
        let count = history.len() as f64;
        let (satiety, energy, adherence) = history.iter().fold((0.0, 0.0, 0.0), |acc, day| {
            (acc.0 + day.satiety, acc.1 + day.energy, acc.2 + day.adherence)
        });
        Some(Self {
            satiety: satiety / count,
            energy: energy / count,
            adherence: adherence / count,
        })
    }
}

/// Deltas to add to the current targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetAdjustments {
    /// Calorie delta (kcal)
    pub calorie_adjustment: f64,
    /// Protein delta (g)
    pub protein_adjustment: f64,
    /// Carbohydrate delta (g)
    pub carb_adjustment: f64,
    /// Fat delta (g)
    pub fat_adjustment: f64,
    /// Rule that fired
    pub rule: AdaptationRule,
    /// Explanation for the user
    pub reason: String,
}

impl TargetAdjustments {
    fn unchanged(rule: AdaptationRule, config: &AdaptationConfig) -> Self {
        Self {
            calorie_adjustment: 0.0,
            protein_adjustment: 0.0,
            carb_adjustment: 0.0,
            fat_adjustment: 0.0,
            rule,
            reason: rule.reason(config),
        }
    }

    /// Whether any delta is non-zero
    #[must_use]
    pub fn changes_targets(&self) -> bool {
        [
            self.calorie_adjustment,
            self.protein_adjustment,
            self.carb_adjustment,
            self.fat_adjustment,
        ]
        .iter()
        .any(|delta| delta.abs() > 0.0)
    }

    /// Targets with the deltas added
    #[must_use]
    pub fn apply(&self, current: &NutritionalTargets) -> NutritionalTargets {
        NutritionalTargets {
            calories: current.calories + self.calorie_adjustment,
            protein: current.protein + self.protein_adjustment,
            carbs: current.carbs + self.carb_adjustment,
            fat: current.fat + self.fat_adjustment,
        }
    }
}

/// Run the engine with the default configuration
#[must_use]
pub fn calculate_adjustments(history: &[DailyFeedback]) -> TargetAdjustments {
    calculate_adjustments_with(history, &AdaptationConfig::default())
}

/// Run the engine with an explicit configuration
#[must_use]
pub fn calculate_adjustments_with(
    history: &[DailyFeedback],
    config: &AdaptationConfig,
) -> TargetAdjustments {
    let averages = match FeedbackAverages::from_history(history) {
        Some(averages) if history.len() >= config.minimum_feedback_days => averages,
        _ => {
            info!(
                days = history.len(),
                required = config.minimum_feedback_days,
                "Insufficient feedback data, no adjustments"
            );
            return TargetAdjustments::unchanged(AdaptationRule::InsufficientData, config);
        }
    };

    debug!(
        satiety = averages.satiety,
        energy = averages.energy,
        adherence = averages.adherence,
        "Average feedback scores"
    );

    let low = config.low_score_threshold;
    let high = config.high_score_threshold;
    let adjustments = if averages.adherence < low {
        TargetAdjustments::unchanged(AdaptationRule::LowAdherence, config)
    } else if averages.energy < low {
        TargetAdjustments {
            calorie_adjustment: config.calorie_step,
            ..TargetAdjustments::unchanged(AdaptationRule::LowEnergy, config)
        }
    } else if averages.satiety < low {
        TargetAdjustments {
            protein_adjustment: config.protein_step,
            calorie_adjustment: (config.protein_step * PROTEIN_KCAL_PER_G).round(),
            ..TargetAdjustments::unchanged(AdaptationRule::LowSatiety, config)
        }
    } else if averages.energy > high && averages.satiety > high {
        TargetAdjustments::unchanged(AdaptationRule::ConsistentlyPositive, config)
    } else {
        TargetAdjustments::unchanged(AdaptationRule::Steady, config)
    };

    info!(
        rule = ?adjustments.rule,
        calories = adjustments.calorie_adjustment,
        protein = adjustments.protein_adjustment,
        "Adaptation rule applied"
    );
    adjustments
}
