// ABOUTME: HTTP server loop for the prediction service
// ABOUTME: Loads the model once, binds the listener, and serves until Ctrl-C or SIGTERM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::{Context, Result};
use std::future;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::config::environment::ServerConfig;
use crate::model::ModelHandle;
use crate::routes::{router, AppState};

/// Load the model and serve the API until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails
pub async fn run(config: ServerConfig) -> Result<()> {
    let model = ModelHandle::load(&config.model_path);
    serve(config, model).await
}

/// Serve the API with an already loaded model
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails
pub async fn serve(config: ServerConfig, model: ModelHandle) -> Result<()> {
    let app = router(AppState::new(model), &config);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(address = %addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
