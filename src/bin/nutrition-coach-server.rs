// ABOUTME: Prediction service binary serving nutrition targets over HTTP
// ABOUTME: Reads environment configuration, applies CLI overrides, and runs the axum server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Coach Server Binary
//!
//! Loads the model artifact once and serves `/predict`, `/adapt`, `/health`
//! and `/ready`.

use anyhow::Result;
use clap::Parser;
use nutrition_coach::{config::environment::ServerConfig, logging, server};
use std::path::PathBuf;
use tracing::info;

/// Command-line overrides for the server configuration
#[derive(Parser)]
#[command(name = "nutrition-coach-server")]
#[command(about = "Nutrition Coach - daily calorie and macro target prediction API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override model artifact path
    #[arg(long)]
    model_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Container runtimes sometimes pass arguments clap rejects
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using environment configuration only");
            Args {
                http_port: None,
                model_path: None,
            }
        }
    };

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(model_path) = args.model_path {
        config.model_path = model_path;
    }
    config.validate()?;

    info!("Starting Nutrition Coach server");
    info!("{}", config.summary());

    server::run(config).await
}
