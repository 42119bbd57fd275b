// ABOUTME: Tests for environment-based server and logging configuration
// ABOUTME: Mutates process environment, so every test runs serially
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutrition_coach::config::environment::{Environment, ServerConfig};
use nutrition_coach::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;
use std::path::Path;

const VARS: [&str; 8] = [
    "HTTP_PORT",
    "HTTP_HOST",
    "MODEL_PATH",
    "CORS_ALLOWED_ORIGINS",
    "ENVIRONMENT",
    "RUST_LOG",
    "LOG_FORMAT",
    "SERVICE_NAME",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8001);
    assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8001");
    assert_eq!(config.model_path, Path::new("models/nutrition_model.json"));
    assert_eq!(config.cors.allowed_origins, "*");
    assert_eq!(config.environment, Environment::Development);
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var("HTTP_PORT", "9100");
    env::set_var("HTTP_HOST", "127.0.0.1");
    env::set_var("MODEL_PATH", "/srv/models/forest.json");
    env::set_var("ENVIRONMENT", "production");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9100");
    assert_eq!(config.model_path, Path::new("/srv/models/forest.json"));
    assert!(config.environment.is_production());
}

#[test]
#[serial]
fn test_unparseable_port_is_rejected() {
    clear_env();
    env::set_var("HTTP_PORT", "eighty");

    let error = ServerConfig::from_env().unwrap_err();
    clear_env();

    assert!(error.to_string().contains("HTTP_PORT"));
}

#[test]
#[serial]
fn test_logging_config_from_environment() {
    clear_env();
    env::set_var("LOG_FORMAT", "json");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("SERVICE_NAME", "coach-eu");

    let config = LoggingConfig::from_env();
    clear_env();

    assert_eq!(config.format, LogFormat::Json);
    assert!(config.include_location);
    assert!(config.include_spans);
    assert_eq!(config.service_name, "coach-eu");
    assert_eq!(config.level, "info");
}

#[test]
#[serial]
fn test_training_job_uses_its_own_service_name() {
    clear_env();
    let config = LoggingConfig::from_env_for("train-model");
    assert_eq!(config.service_name, "train-model");
    assert_eq!(config.format, LogFormat::Pretty);
}
