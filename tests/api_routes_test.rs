// ABOUTME: Integration tests for the HTTP API driven through the axum router
// ABOUTME: Covers prediction, validation failures, model unavailability, readiness, and adaptation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use axum::http::StatusCode;
use common::{get, post_json, post_raw, ready_app, reference_profile_json, unavailable_app};
use nutrition_coach::config::environment::ServerConfig;
use nutrition_coach::model::ModelHandle;
use nutrition_coach::routes::{router, AppState};
use nutrition_intelligence::forest::{DenseMatrix, ForestParams};
use nutrition_intelligence::RandomForest;
use serde_json::json;

#[tokio::test]
async fn test_predict_returns_four_finite_targets() {
    let (status, body) = post_json(ready_app(), "/predict", &reference_profile_json()).await;

    assert_eq!(status, StatusCode::OK);
    for field in ["calories", "protein", "carbs", "fat"] {
        let value = body[field].as_f64().unwrap();
        assert!(value.is_finite() && value > 0.0, "{field} = {value}");
    }
    assert_eq!(body.as_object().unwrap().len(), 4);
}

#[tokio::test]
async fn test_predict_lands_near_the_formula_value() {
    let (_, body) = post_json(ready_app(), "/predict", &reference_profile_json()).await;

    // Formula value is 3173.13 kcal; a small forest should land well inside that band
    let calories = body["calories"].as_f64().unwrap();
    assert!((calories - 3173.13).abs() < 750.0, "calories = {calories}");
}

#[tokio::test]
async fn test_predict_is_deterministic() {
    let (_, first) = post_json(ready_app(), "/predict", &reference_profile_json()).await;
    let (_, second) = post_json(ready_app(), "/predict", &reference_profile_json()).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_negative_age_is_rejected_with_field_detail() {
    let mut profile = reference_profile_json();
    profile["age"] = json!(-5);

    let (status, body) = post_json(ready_app(), "/predict", &profile).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALUE_OUT_OF_RANGE");
    assert_eq!(body["error"]["details"]["field"], "age");
    assert_eq!(body["error"]["details"]["value"], -5);
}

#[tokio::test]
async fn test_zero_weight_is_rejected() {
    let mut profile = reference_profile_json();
    profile["weight"] = json!(0);

    let (status, body) = post_json(ready_app(), "/predict", &profile).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["field"], "weight");
}

#[tokio::test]
async fn test_unknown_goal_is_rejected() {
    let mut profile = reference_profile_json();
    profile["goal"] = json!("Keto");

    let (status, body) = post_json(ready_app(), "/predict", &profile).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(body["error"]["details"]["reason"]
        .as_str()
        .unwrap()
        .contains("Keto"));
}

#[tokio::test]
async fn test_missing_field_is_reported() {
    let mut profile = reference_profile_json();
    profile.as_object_mut().unwrap().remove("gender");

    let (status, body) = post_json(ready_app(), "/predict", &profile).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let (status, body) = post_raw(ready_app(), "/predict", "{\"age\": 30,").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
}

#[tokio::test]
async fn test_unavailable_model_answers_503_while_health_stays_ok() {
    let (status, body) = post_json(unavailable_app(), "/predict", &reference_profile_json()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "MODEL_UNAVAILABLE");
    assert_eq!(body["error"]["message"], "model not loaded");

    let (status, body) = get(unavailable_app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_forest_of_wrong_width_fails_the_prediction() {
    let features = DenseMatrix::from_rows(&[
        [20.0, 60.0],
        [35.0, 70.0],
        [50.0, 80.0],
        [65.0, 90.0],
    ])
    .unwrap();
    let targets = DenseMatrix::from_rows(&[
        [2000.0, 120.0, 250.0, 60.0],
        [2300.0, 140.0, 280.0, 70.0],
        [2600.0, 160.0, 310.0, 80.0],
        [2900.0, 180.0, 340.0, 90.0],
    ])
    .unwrap();
    let params = ForestParams {
        n_estimators: 3,
        ..ForestParams::default()
    };
    let forest = RandomForest::fit(&features, &targets, &params).unwrap();
    let app = router(
        AppState::new(ModelHandle::from_forest(forest)),
        &ServerConfig::default(),
    );

    let (status, body) = post_json(app, "/predict", &reference_profile_json()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "PREDICTION_FAILED");
    let message = body["error"]["message"].as_str().unwrap();
    assert!(
        message.starts_with("An error occurred during prediction: Shape mismatch"),
        "{message}"
    );
}

#[tokio::test]
async fn test_ready_reflects_model_state() {
    let (status, body) = get(ready_app(), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model_loaded"], true);

    let (status, body) = get(unavailable_app(), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["model_loaded"], false);
    assert_eq!(body["reason"], "artifact not found");
}

#[tokio::test]
async fn test_adapt_applies_low_energy_rule() {
    let request = json!({
        "feedback": [
            { "satiety": 3, "energy": 2, "adherence": 4 },
            { "satiety": 3, "energy": 2, "adherence": 4 },
            { "satiety": 3, "energy": 1, "adherence": 4 }
        ],
        "current": { "calories": 2000, "protein": 150, "carbs": 200, "fat": 60 }
    });

    let (status, body) = post_json(ready_app(), "/adapt", &request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adjustments"]["rule"], "low_energy");
    assert_eq!(body["adjustments"]["calorie_adjustment"], 100.0);
    assert_eq!(body["adjusted_targets"]["calories"], 2100.0);
    assert_eq!(body["adjusted_targets"]["protein"], 150.0);
}

#[tokio::test]
async fn test_adapt_without_current_omits_adjusted_targets() {
    let request = json!({ "feedback": [{ "satiety": 3, "energy": 3, "adherence": 3 }] });

    let (status, body) = post_json(unavailable_app(), "/adapt", &request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adjustments"]["rule"], "insufficient_data");
    assert!(body.get("adjusted_targets").is_none());
}

#[tokio::test]
async fn test_adapt_rejects_out_of_scale_scores() {
    let request = json!({
        "feedback": [
            { "satiety": 3, "energy": 3, "adherence": 3 },
            { "satiety": 6, "energy": 3, "adherence": 3 }
        ]
    });

    let (status, body) = post_json(ready_app(), "/adapt", &request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["details"]["field"], "feedback[1].satiety");
}
