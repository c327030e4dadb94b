// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Tests for GET /health

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use image::DynamicImage;
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`
use vision_cad_node::{
    api::{create_app, AppState},
    drawing::DxfWriter,
    version,
    vision::{Detection, DetectionError, DetectorInfo, ObjectDetector},
};

struct NamedDetector;

impl ObjectDetector for NamedDetector {
    fn detect(&self, _image: &DynamicImage) -> Result<Vec<Detection>, DetectionError> {
        Ok(vec![])
    }

    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            name: "yolo".to_string(),
            model_path: "./models/best.onnx".to_string(),
            input_size: 640,
            num_classes: 3,
        }
    }
}

#[tokio::test]
async fn test_health_reports_detector_and_version() {
    let app = create_app(AppState::new(Arc::new(NamedDetector), DxfWriter::new()));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"]["version"], version::VERSION_NUMBER);
    assert_eq!(body["detector"]["name"], "yolo");
    assert_eq!(body["detector"]["inputSize"], 640);
    assert_eq!(body["detector"]["numClasses"], 3);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = create_app(AppState::new(Arc::new(NamedDetector), DxfWriter::new()));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/segment")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
