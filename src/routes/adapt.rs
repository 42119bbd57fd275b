// ABOUTME: Feedback adaptation route adjusting targets from recent daily feedback
// ABOUTME: Validates 1-5 scores, runs the rule engine, and optionally applies the deltas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::routing::post;
use axum::{Json, Router};
use nutrition_core::errors::AppResult;
use nutrition_core::models::NutritionalTargets;
use nutrition_intelligence::adaptation::validate_feedback;
use nutrition_intelligence::{calculate_adjustments, DailyFeedback, TargetAdjustments};
use serde::{Deserialize, Serialize};

use super::extract::ApiJson;

/// Body of `POST /adapt`
#[derive(Debug, Clone, Deserialize)]
pub struct AdaptRequest {
    /// Recent daily feedback, oldest first
    pub feedback: Vec<DailyFeedback>,
    /// Targets to adjust, if the caller wants them applied
    #[serde(default)]
    pub current: Option<NutritionalTargets>,
}

/// Response of `POST /adapt`
#[derive(Debug, Clone, Serialize)]
pub struct AdaptResponse {
    /// Deltas and the rule that produced them
    pub adjustments: TargetAdjustments,
    /// `current` with the deltas applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_targets: Option<NutritionalTargets>,
}

/// Adaptation routes
pub struct AdaptRoutes;

impl AdaptRoutes {
    /// Create the adaptation route
    pub fn routes() -> Router {
        Router::new().route("/adapt", post(Self::adapt))
    }

    async fn adapt(ApiJson(request): ApiJson<AdaptRequest>) -> AppResult<Json<AdaptResponse>> {
        validate_feedback(&request.feedback)?;

        let adjustments = calculate_adjustments(&request.feedback);
        let adjusted_targets = request
            .current
            .map(|current| adjustments.apply(&current));

        Ok(Json(AdaptResponse {
            adjustments,
            adjusted_targets,
        }))
    }
}
