// ABOUTME: Feature encoder converting profiles into the fixed-order model input vector
// ABOUTME: Used identically by the training matrix builder and the prediction service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feature encoding.
//!
//! Numeric fields are copied into their fixed slots. Each categorical field
//! sets the single slot named `"{field}_{value}"` to 1.0 and leaves the other
//! slots of its group at 0.0.
//!
//! A categorical value with no matching column leaves its whole group at zero
//! and raises no error. [`Profile`] enums are closed so this cannot happen for
//! validated requests; [`encode_fields`] keeps the behavior observable for raw
//! labels and logs a warning when it occurs.

use serde::{Deserialize, Serialize};
use std::ops::Index;
use tracing::warn;

use crate::constants::features::{
    ACTIVITY_LEVEL_FIELD, AGE_SLOT, CATEGORICAL_FIELDS, FEATURE_COLUMNS, FEATURE_COUNT,
    GENDER_FIELD, GOAL_FIELD, HEIGHT_SLOT, WEIGHT_SLOT,
};
use crate::models::Profile;

/// Fixed-length model input in [`FEATURE_COLUMNS`] order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Raw slot values
    #[must_use]
    pub const fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Raw slot values as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterate `(column name, value)` pairs in slot order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.0.iter().copied())
    }

    /// Sum of the one-hot slots belonging to a categorical field
    #[must_use]
    pub fn group_sum(&self, field: &str) -> f64 {
        group_slots(field).map(|slot| self.0[slot]).sum()
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, slot: usize) -> &f64 {
        &self.0[slot]
    }
}

impl From<&Profile> for FeatureVector {
    fn from(profile: &Profile) -> Self {
        encode(profile)
    }
}

/// Encode a validated profile
#[must_use]
pub fn encode(profile: &Profile) -> FeatureVector {
    encode_fields(
        f64::from(profile.age),
        profile.height,
        profile.weight,
        &[
            (GENDER_FIELD, profile.gender.as_str()),
            (ACTIVITY_LEVEL_FIELD, profile.activity_level.as_str()),
            (GOAL_FIELD, profile.goal.as_str()),
        ],
    )
}

/// Encode numeric fields and raw categorical `(field, value)` labels
///
/// Unknown labels encode their group as all-zero.
#[must_use]
pub fn encode_fields(
    age: f64,
    height: f64,
    weight: f64,
    categoricals: &[(&str, &str)],
) -> FeatureVector {
    let mut slots = [0.0; FEATURE_COUNT];
    slots[AGE_SLOT] = age;
    slots[HEIGHT_SLOT] = height;
    slots[WEIGHT_SLOT] = weight;

    for &(field, value) in categoricals {
        if let Some(slot) = one_hot_slot(field, value) {
            slots[slot] = 1.0;
        } else {
            warn!(
                field,
                value, "Unrecognized categorical value, encoding group as all-zero"
            );
        }
    }

    FeatureVector(slots)
}

/// Slot index of the `"{field}_{value}"` column, if one exists
#[must_use]
pub fn one_hot_slot(field: &str, value: &str) -> Option<usize> {
    if !CATEGORICAL_FIELDS.contains(&field) {
        return None;
    }
    FEATURE_COLUMNS.iter().position(|column| {
        column
            .strip_prefix(field)
            .and_then(|rest| rest.strip_prefix('_'))
            .is_some_and(|label| label == value)
    })
}

/// Slot indices of every one-hot column belonging to `field`
pub fn group_slots(field: &str) -> impl Iterator<Item = usize> + '_ {
    let known = CATEGORICAL_FIELDS.contains(&field);
    FEATURE_COLUMNS
        .iter()
        .enumerate()
        .filter(move |(_, column)| {
            known
                && column
                    .strip_prefix(field)
                    .is_some_and(|rest| rest.starts_with('_'))
        })
        .map(|(slot, _)| slot)
}
