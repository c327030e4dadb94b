// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection endpoint handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::request::DetectRequest;
use super::response::DetectionRecord;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::detect_base64;

/// POST /detect - Detect objects in an image
///
/// # Request
/// - `image_data`: Base64-encoded image data (required)
///
/// # Response
/// A JSON array of `{"Confidence", "Object", "BoxCoordinate"}` records in
/// the detector's native order; empty when nothing is found.
///
/// # Errors
/// - 400 Bad Request: `image_data` missing or empty, or body is not JSON
/// - 500 Internal Server Error: image decoding or inference failed
pub async fn detect_handler(
    State(state): State<AppState>,
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> Result<Json<Vec<DetectionRecord>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Detect request rejected: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let image_data = match request.validate() {
        Ok(data) => data.to_string(),
        Err(e) => {
            warn!("Detect validation failed: {}", e);
            return Err(e);
        }
    };

    debug!("Detect request received: {} base64 chars", image_data.len());

    let detector = state.detector.clone();
    let started = Instant::now();

    let detections =
        tokio::task::spawn_blocking(move || detect_base64(detector.as_ref(), &image_data))
            .await
            .map_err(|e| ApiError::InferenceError(e.to_string()))?
            .map_err(|e| {
                warn!("Detection failed: {}", e);
                ApiError::from(e)
            })?;

    info!(
        "Detection complete: {} objects, {}ms",
        detections.len(),
        started.elapsed().as_millis()
    );

    Ok(Json(
        detections.into_iter().map(DetectionRecord::from).collect(),
    ))
}
