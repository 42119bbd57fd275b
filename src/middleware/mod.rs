// ABOUTME: HTTP middleware for the prediction API
// ABOUTME: CORS configuration and request ID propagation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS layer built from configuration
pub mod cors;
/// Request ID generation, propagation, and request spans
pub mod request_id;

pub use cors::setup_cors;
pub use request_id::{
    create_request_span, propagate_request_id_layer, set_request_id_layer, REQUEST_ID_HEADER,
};
