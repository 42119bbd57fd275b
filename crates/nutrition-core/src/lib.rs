// ABOUTME: Core types and constants for the nutrition coach platform
// ABOUTME: Foundation crate with error handling, domain models, and the shared feature encoder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Core
//!
//! Foundation crate shared by the offline training job and the prediction
//! service. Anything both sides must agree on lives here, most importantly the
//! ordered feature columns consumed by the regression model.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and HTTP mapping
//! - **constants**: Feature/target column order and service defaults
//! - **models**: Profile, categorical enums, and nutritional targets
//! - **features**: The feature encoder (profile -> fixed-order vector)

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core domain models (Profile, Gender, `ActivityLevel`, Goal, targets)
pub mod models;

/// Feature encoding shared by training and inference
pub mod features;
