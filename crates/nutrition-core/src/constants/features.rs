// ABOUTME: The single ordered list of model feature columns
// ABOUTME: Consumed verbatim by the training matrix builder and the inference encoder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feature column order.
//!
//! Columns are named `"{field}_{value}"` for one-hot slots. The model only sees
//! raw numbers, so reordering or renaming anything here silently invalidates
//! every persisted artifact. Artifacts record this list and the loader refuses
//! any artifact whose list differs.

/// Number of slots in a feature vector
pub const FEATURE_COUNT: usize = 14;

/// Ordered feature columns
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "age",
    "height",
    "weight",
    "gender_Female",
    "gender_Male",
    "gender_Other",
    "activity_level_Sedentary",
    "activity_level_Lightly active",
    "activity_level_Moderately active",
    "activity_level_Very active",
    "goal_Weight Loss",
    "goal_Muscle Gain",
    "goal_Carbo-Cut Diet",
    "goal_Fat Cut Diet",
];

/// Slot of the `age` column
pub const AGE_SLOT: usize = 0;
/// Slot of the `height` column
pub const HEIGHT_SLOT: usize = 1;
/// Slot of the `weight` column
pub const WEIGHT_SLOT: usize = 2;

/// Categorical field name for gender
pub const GENDER_FIELD: &str = "gender";
/// Categorical field name for activity level
pub const ACTIVITY_LEVEL_FIELD: &str = "activity_level";
/// Categorical field name for goal
pub const GOAL_FIELD: &str = "goal";

/// Categorical fields in the order they appear in [`FEATURE_COLUMNS`]
pub const CATEGORICAL_FIELDS: [&str; 3] = [GENDER_FIELD, ACTIVITY_LEVEL_FIELD, GOAL_FIELD];
