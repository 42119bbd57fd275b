// ABOUTME: User profile model and its closed categorical domains
// ABOUTME: Request validation turns wire payloads into immutable Profile values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{AppError, AppResult};

/// Gender used for BMR formulas and one-hot encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male (Harris-Benedict male equation)
    Male,
    /// Female (Harris-Benedict female equation)
    Female,
    /// Other (mean of the male and female equations)
    Other,
}

impl Gender {
    /// All genders in declaration order
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    /// Label used on the wire and in feature column names
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

/// Self-reported activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    /// Little or no exercise
    #[serde(rename = "Sedentary")]
    Sedentary,
    /// Light exercise 1-3 days/week
    #[serde(rename = "Lightly active")]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[serde(rename = "Moderately active")]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    #[serde(rename = "Very active")]
    VeryActive,
}

impl ActivityLevel {
    /// All activity levels in declaration order
    pub const ALL: [Self; 4] = [
        Self::Sedentary,
        Self::LightlyActive,
        Self::ModeratelyActive,
        Self::VeryActive,
    ];

    /// Label used on the wire and in feature column names
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "Sedentary",
            Self::LightlyActive => "Lightly active",
            Self::ModeratelyActive => "Moderately active",
            Self::VeryActive => "Very active",
        }
    }
}

/// Dietary goal driving calorie offsets and macro splits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Goal {
    /// Moderate deficit, high protein
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    /// Surplus, very high protein
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
    /// Small deficit, ketogenic-style split
    #[serde(rename = "Carbo-Cut Diet")]
    CarboCut,
    /// Deficit, low fat split
    #[serde(rename = "Fat Cut Diet")]
    FatCut,
}

impl Goal {
    /// All goals in declaration order
    pub const ALL: [Self; 4] = [Self::WeightLoss, Self::MuscleGain, Self::CarboCut, Self::FatCut];

    /// Label used on the wire and in feature column names
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightLoss => "Weight Loss",
            Self::MuscleGain => "Muscle Gain",
            Self::CarboCut => "Carbo-Cut Diet",
            Self::FatCut => "Fat Cut Diet",
        }
    }
}

macro_rules! display_as_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_label!(Gender, ActivityLevel, Goal);

/// Validated user profile, constructed once per request and never mutated
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Profile {
    /// Age in whole years
    pub age: u32,
    /// Height in centimeters
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Gender
    pub gender: Gender,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Dietary goal
    pub goal: Goal,
}

impl Profile {
    /// Build a profile, enforcing positivity of the numeric fields
    ///
    /// # Errors
    ///
    /// Returns a `ValueOutOfRange` error naming the first offending field
    pub fn new(
        age: u32,
        height: f64,
        weight: f64,
        gender: Gender,
        activity_level: ActivityLevel,
        goal: Goal,
    ) -> AppResult<Self> {
        ProfileRequest {
            age: i64::from(age),
            height,
            weight,
            gender,
            activity_level,
            goal,
        }
        .validate()
    }
}

/// Wire representation of a profile before domain validation
///
/// Categorical fields are closed enums, so unknown labels are rejected by
/// deserialization. Numeric fields are accepted in a wider type so that
/// out-of-domain values produce field-level errors instead of parse errors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileRequest {
    /// Age in years, must be > 0
    pub age: i64,
    /// Height in centimeters, must be > 0
    pub height: f64,
    /// Weight in kilograms, must be > 0
    pub weight: f64,
    /// Gender
    pub gender: Gender,
    /// Activity level
    pub activity_level: ActivityLevel,
    /// Dietary goal
    pub goal: Goal,
}

impl ProfileRequest {
    /// Check numeric domains and produce an immutable [`Profile`]
    ///
    /// # Errors
    ///
    /// Returns a `ValueOutOfRange` error for non-positive or non-finite values
    pub fn validate(self) -> AppResult<Profile> {
        let age = u32::try_from(self.age)
            .ok()
            .filter(|age| *age > 0)
            .ok_or_else(|| AppError::field_out_of_range("age", "greater than 0", self.age))?;

        let height = positive_finite("height", self.height)?;
        let weight = positive_finite("weight", self.weight)?;

        Ok(Profile {
            age,
            height,
            weight,
            gender: self.gender,
            activity_level: self.activity_level,
            goal: self.goal,
        })
    }
}

impl TryFrom<ProfileRequest> for Profile {
    type Error = AppError;

    fn try_from(request: ProfileRequest) -> AppResult<Self> {
        request.validate()
    }
}

fn positive_finite(field: &str, value: f64) -> AppResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AppError::field_out_of_range(
            field,
            "greater than 0",
            serde_json::Number::from_f64(value)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
        ))
    }
}
