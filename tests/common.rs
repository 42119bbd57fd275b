// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Trains a small forest once per test binary and builds routers around it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::expect_used,
    clippy::unwrap_used
)]
//! Shared test utilities for `nutrition_coach`

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use nutrition_coach::config::environment::ServerConfig;
use nutrition_coach::model::ModelHandle;
use nutrition_coach::routes::{router, AppState};
use nutrition_intelligence::forest::{ForestParams, TreeParams};
use nutrition_intelligence::training::{train, TrainingOptions};
use nutrition_intelligence::RandomForest;
use serde_json::Value;
use std::env;
use std::sync::{Once, OnceLock};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();
static SMALL_FOREST: OnceLock<RandomForest> = OnceLock::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Options for a forest that trains in well under a second
pub fn quick_training_options() -> TrainingOptions {
    TrainingOptions {
        samples: 1_000,
        forest: ForestParams {
            n_estimators: 12,
            tree: TreeParams {
                max_depth: Some(12),
                ..TreeParams::default()
            },
            ..ForestParams::default()
        },
        ..TrainingOptions::default()
    }
}

/// Small trained forest, shared by every test in the binary
pub fn small_forest() -> RandomForest {
    init_test_logging();
    SMALL_FOREST
        .get_or_init(|| {
            train(&quick_training_options())
                .expect("training the test forest")
                .into_forest()
        })
        .clone()
}

/// Router serving the small forest
pub fn ready_app() -> Router {
    router(
        AppState::new(ModelHandle::from_forest(small_forest())),
        &ServerConfig::default(),
    )
}

/// Router whose model failed to load
pub fn unavailable_app() -> Router {
    init_test_logging();
    router(
        AppState::new(ModelHandle::unavailable("artifact not found")),
        &ServerConfig::default(),
    )
}

/// The reference profile used across scenarios
pub fn reference_profile_json() -> Value {
    serde_json::json!({
        "age": 30,
        "height": 180,
        "weight": 80,
        "gender": "Male",
        "activity_level": "Moderately active",
        "goal": "Muscle Gain"
    })
}

/// POST a JSON body
pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST a raw body
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// GET a path
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
