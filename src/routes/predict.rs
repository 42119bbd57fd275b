// ABOUTME: Prediction route turning a user profile into daily nutritional targets
// ABOUTME: Validates the profile, encodes it with the shared encoder, and queries the forest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use nutrition_core::errors::{AppError, AppResult};
use nutrition_core::features::encode;
use nutrition_core::models::{NutritionalTargets, ProfileRequest};
use std::time::Instant;
use tracing::debug;

use super::{extract::ApiJson, AppState};
use crate::logging::AppLogger;

/// Prediction routes
pub struct PredictRoutes;

impl PredictRoutes {
    /// Create the prediction route
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route("/predict", post(Self::predict))
            .with_state(state)
    }

    async fn predict(
        State(state): State<AppState>,
        ApiJson(request): ApiJson<ProfileRequest>,
    ) -> AppResult<Json<NutritionalTargets>> {
        let profile = request.validate()?;
        let forest = state.model.model()?;

        let started = Instant::now();
        let features = encode(&profile);
        debug!(features = ?features.as_slice(), "Encoded profile");

        let targets = forest
            .predict_targets(&features)
            .map_err(AppError::prediction_failed)?;

        let elapsed = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        AppLogger::log_prediction(targets.calories, elapsed);

        Ok(Json(targets))
    }
}
