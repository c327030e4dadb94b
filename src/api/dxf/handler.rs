// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DXF endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::{debug, info, warn};

use super::request::DxfRequest;
use super::response::DxfResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /dxf - Render line segments into a DXF document
///
/// # Request
/// - `lines`: array of `{"start": {"x","y","z"}, "end": {"x","y","z"}}` (required)
///
/// # Response
/// - `result`: the complete DXF text, one LINE entity per segment
///
/// # Errors
/// - 400 Bad Request: `lines` missing or empty, or body is not JSON
/// - 500 Internal Server Error: malformed segment or serialization failure
pub async fn dxf_handler(
    State(state): State<AppState>,
    payload: Result<Json<DxfRequest>, JsonRejection>,
) -> Result<Json<DxfResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("DXF request rejected: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let lines = request.into_lines().map_err(|e| {
        warn!("DXF validation failed: {}", e);
        e
    })?;

    debug!("DXF request received: {} segments", lines.len());

    let writer = state.dxf_writer.clone();
    let segment_count = lines.len();

    let result = tokio::task::spawn_blocking(move || writer.draw_lines(&lines))
        .await
        .map_err(|e| ApiError::SerializationError(e.to_string()))?
        .map_err(|e| {
            warn!("DXF generation failed: {}", e);
            ApiError::from(e)
        })?;

    info!(
        "DXF generated: {} lines, {} bytes",
        segment_count,
        result.len()
    );

    Ok(Json(DxfResponse { result }))
}
