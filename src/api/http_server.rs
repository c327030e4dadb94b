// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::detect::detect_handler;
use super::dxf::dxf_handler;
use crate::drawing::DxfWriter;
use crate::version;
use crate::vision::{DetectorInfo, ObjectDetector};

/// Shared handler state
///
/// The detector is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<dyn ObjectDetector>,
    pub dxf_writer: Arc<DxfWriter>,
}

impl AppState {
    pub fn new(detector: Arc<dyn ObjectDetector>, dxf_writer: DxfWriter) -> Self {
        Self {
            detector,
            dxf_writer: Arc::new(dxf_writer),
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: serde_json::Value,
    pub detector: DetectorInfo,
}

/// Build the application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Object detection
        .route("/detect", post(detect_handler))
        // DXF generation
        .route("/dxf", post(dxf_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: version::get_version_info(),
        detector: state.detector.info(),
    })
}
