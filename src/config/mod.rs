// ABOUTME: Configuration module for the prediction service
// ABOUTME: Environment-only server settings; label constants live in nutrition-intelligence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment and server configuration
pub mod environment;

pub use environment::{CorsConfig, Environment, ServerConfig};
