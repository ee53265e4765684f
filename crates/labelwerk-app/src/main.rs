// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Labelwerk — label PDF service
//
// Entry point. Loads configuration, initialises logging, prepares the output
// directory and serves the HTTP API.

mod config;
mod errors;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::routes::build_router;
use crate::services::output::prepare_output_dir;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .init();

    info!("Labelwerk starting v{}", env!("CARGO_PKG_VERSION"));

    let output_dir = prepare_output_dir(&config.labels.output_dir).with_context(|| {
        format!(
            "cannot create output directory {}",
            config.labels.output_dir.display()
        )
    })?;
    info!(path = %output_dir.display(), "output directory ready");

    let state = AppState::new(config.labels.clone(), output_dir);
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
