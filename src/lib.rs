// ABOUTME: Nutrition coach service library: configuration, logging, model handle, and HTTP API
// ABOUTME: Wires the shared encoder and the random forest into an axum server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Nutrition Coach
//!
//! Predicts daily calorie and macronutrient targets from a small user
//! profile. The algorithms live in `nutrition-intelligence`; this package
//! serves them.
//!
//! ## Modules
//!
//! - **config**: Environment-based server configuration
//! - **logging**: Tracing subscriber setup
//! - **model**: The model handle loaded once at startup
//! - **middleware**: CORS and request IDs
//! - **routes**: `/health`, `/ready`, `/predict`, `/adapt`
//! - **server**: Listener and graceful shutdown

/// Server configuration
pub mod config;

/// Error re-exports
pub mod errors;

/// Structured logging
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Model handle
pub mod model;

/// HTTP routes
pub mod routes;

/// Server loop
pub mod server;

pub use config::ServerConfig;
pub use model::ModelHandle;
pub use routes::{router, AppState};
