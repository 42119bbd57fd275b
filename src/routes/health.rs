// ABOUTME: Health and readiness route handlers for service monitoring
// ABOUTME: Health always answers ok; readiness reflects whether the model is loaded
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes
//!
//! `/health` is a liveness probe and stays `ok` even when the model failed to
//! load. Load balancers that must not route to a model-less instance should
//! use `/ready`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use super::AppState;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(state: AppState) -> Router {
        Router::new()
            .route("/health", get(Self::health))
            .route("/ready", get(Self::ready))
            .with_state(state)
    }

    async fn health() -> Json<serde_json::Value> {
        Json(json!({ "status": "ok" }))
    }

    async fn ready(State(state): State<AppState>) -> Response {
        match state.model.unavailable_reason() {
            None => (
                StatusCode::OK,
                Json(json!({ "status": "ready", "model_loaded": true })),
            )
                .into_response(),
            Some(reason) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "model_loaded": false,
                    "reason": reason,
                })),
            )
                .into_response(),
        }
    }
}
