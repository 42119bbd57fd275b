// ABOUTME: Re-export of the unified error types for the root package
// ABOUTME: Keeps crate::errors paths stable for handlers and binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use nutrition_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
pub use nutrition_intelligence::{ModelError, ModelResult};
