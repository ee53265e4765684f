// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod labels;
pub mod status;

use axum::Router;
use axum::routing::{get, post};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status::root))
        .route("/printer", get(status::printer))
        .route("/generate", post(labels::generate))
        .route("/files/{name}", get(labels::get_file))
        .with_state(state)
}
