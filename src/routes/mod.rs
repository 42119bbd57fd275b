// ABOUTME: Route module organization for the nutrition coach HTTP API
// ABOUTME: Assembles health, prediction, and adaptation routes with the shared middleware stack
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /health` | liveness, always ok |
//! | `GET /ready` | 200 when the model is loaded, 503 otherwise |
//! | `POST /predict` | profile to nutritional targets |
//! | `POST /adapt` | feedback to target adjustments |

/// Feedback adaptation routes
pub mod adapt;
/// JSON extractor with unified rejections
pub mod extract;
/// Health and readiness routes
pub mod health;
/// Prediction route
pub mod predict;

pub use adapt::AdaptRoutes;
pub use health::HealthRoutes;
pub use predict::PredictRoutes;

use axum::Router;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::environment::ServerConfig;
use crate::middleware::{
    create_request_span, propagate_request_id_layer, set_request_id_layer, setup_cors,
};
use crate::model::ModelHandle;

/// State shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    /// Model loaded at startup
    pub model: Arc<ModelHandle>,
}

impl AppState {
    /// Wrap a model handle
    #[must_use]
    pub fn new(model: ModelHandle) -> Self {
        Self {
            model: Arc::new(model),
        }
    }
}

/// Build the full application router
#[must_use]
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(state.clone()))
        .merge(PredictRoutes::routes(state))
        .merge(AdaptRoutes::routes())
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(create_request_span))
                .layer(propagate_request_id_layer())
                .layer(setup_cors(config)),
        )
}
