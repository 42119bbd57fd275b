// ABOUTME: JSON body extractor that reports parse failures in the unified error envelope
// ABOUTME: Wraps axum's Json so malformed bodies and unknown enum values become 400 AppErrors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use nutrition_core::errors::{AppError, ErrorCode};
use serde::de::DeserializeOwned;
use serde_json::json;

/// `Json<T>` with rejections mapped to [`AppError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(request, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

/// Classify a body rejection
#[must_use]
pub fn rejection_to_error(rejection: &JsonRejection) -> AppError {
    let reason = rejection.body_text();
    let code = match rejection {
        JsonRejection::JsonDataError(_) if reason.contains("missing field") => {
            ErrorCode::MissingRequiredField
        }
        JsonRejection::JsonDataError(_) => ErrorCode::InvalidInput,
        _ => ErrorCode::InvalidFormat,
    };

    AppError::new(code, code.description()).with_details(json!({ "reason": reason }))
}
