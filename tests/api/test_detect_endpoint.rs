// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Endpoint tests for POST /detect
//!
//! These tests verify that the detect route:
//! - Rejects missing or empty `image_data` with the fixed 400 body
//! - Reports decode and inference failures as 500 with an `error` string
//! - Returns detector output as `Confidence`/`Object`/`BoxCoordinate` records
//! - Keeps the detector's native ordering

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::DynamicImage;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`
use vision_cad_node::{
    api::{create_app, AppState},
    drawing::DxfWriter,
    vision::{Detection, DetectionError, DetectorInfo, ObjectDetector},
};

// 1x1 red PNG - minimal valid image
const TINY_PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

/// Detector returning a fixed result regardless of the image
struct FixedDetector {
    detections: Vec<Detection>,
}

impl ObjectDetector for FixedDetector {
    fn detect(&self, _image: &DynamicImage) -> Result<Vec<Detection>, DetectionError> {
        Ok(self.detections.clone())
    }

    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            name: "fixed".to_string(),
            model_path: "memory".to_string(),
            input_size: 640,
            num_classes: 2,
        }
    }
}

/// Detector that always fails inference
struct FailingDetector;

impl ObjectDetector for FailingDetector {
    fn detect(&self, _image: &DynamicImage) -> Result<Vec<Detection>, DetectionError> {
        Err(DetectionError::UnexpectedOutput("output tensor missing".to_string()))
    }

    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            name: "failing".to_string(),
            model_path: "memory".to_string(),
            input_size: 640,
            num_classes: 0,
        }
    }
}

fn detection(confidence: f32, label: &str, xyxy: [f32; 4]) -> Detection {
    Detection {
        x1: xyxy[0],
        y1: xyxy[1],
        x2: xyxy[2],
        y2: xyxy[3],
        confidence,
        class_id: 0,
        label: label.to_string(),
    }
}

fn app_with(detector: Arc<dyn ObjectDetector>) -> Router {
    create_app(AppState::new(detector, DxfWriter::new()))
}

fn app_with_detections(detections: Vec<Detection>) -> Router {
    app_with(Arc::new(FixedDetector { detections }))
}

async fn post_detect(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/detect")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).expect("response body should be JSON");
    (status, json)
}

#[cfg(test)]
mod detect_endpoint_tests {
    use super::*;

    // =========================================================================
    // Validation
    // =========================================================================

    #[tokio::test]
    async fn test_missing_image_data() {
        let (status, body) = post_detect(app_with_detections(vec![]), "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing image data"}));
    }

    #[tokio::test]
    async fn test_empty_image_data() {
        let (status, body) =
            post_detect(app_with_detections(vec![]), r#"{"image_data": ""}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Missing image data"}));
    }

    #[tokio::test]
    async fn test_body_not_json_still_returns_json_error() {
        let (status, body) = post_detect(app_with_detections(vec![]), "image please").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    // =========================================================================
    // Adapter failures
    // =========================================================================

    #[tokio::test]
    async fn test_non_image_payload_returns_500() {
        let payload = STANDARD.encode("definitely not pixels");
        let body = json!({ "image_data": payload }).to_string();

        let (status, body) = post_detect(app_with_detections(vec![]), &body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_base64_returns_500() {
        let (status, body) =
            post_detect(app_with_detections(vec![]), r#"{"image_data": "***"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("base64"));
    }

    #[tokio::test]
    async fn test_inference_failure_message_is_verbatim() {
        let body = json!({ "image_data": TINY_PNG_BASE64 }).to_string();

        let (status, body) = post_detect(app_with(Arc::new(FailingDetector)), &body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "Unexpected model output: output tensor missing"})
        );
    }

    // =========================================================================
    // Success
    // =========================================================================

    #[tokio::test]
    async fn test_detection_records_shape() {
        let app = app_with_detections(vec![
            detection(0.875, "door", [1.0, 2.0, 30.0, 40.0]),
            detection(0.5, "window", [5.0, 5.0, 6.0, 6.0]),
        ]);
        let body = json!({ "image_data": TINY_PNG_BASE64 }).to_string();

        let (status, body) = post_detect(app, &body).await;

        assert_eq!(status, StatusCode::OK);
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 2);

        for record in records {
            let confidence = record["Confidence"].as_f64().unwrap();
            assert!((0.0..=1.0).contains(&confidence));
            assert!(!record["Object"].as_str().unwrap().is_empty());
            let coords = record["BoxCoordinate"].as_array().unwrap();
            assert_eq!(coords.len(), 4);
            assert!(coords.iter().all(|c| c.is_number()));
        }

        assert_eq!(
            records[0],
            json!({"Confidence": 0.875, "Object": "door", "BoxCoordinate": [1.0, 2.0, 30.0, 40.0]})
        );
    }

    #[tokio::test]
    async fn test_native_order_preserved() {
        let app = app_with_detections(vec![
            detection(0.25, "low", [0.0, 0.0, 1.0, 1.0]),
            detection(0.75, "high", [0.0, 0.0, 1.0, 1.0]),
        ]);
        let body = json!({ "image_data": TINY_PNG_BASE64 }).to_string();

        let (_, body) = post_detect(app, &body).await;

        let labels: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["Object"].as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["low", "high"]);
    }

    #[tokio::test]
    async fn test_no_detections_returns_empty_array() {
        let body = json!({ "image_data": TINY_PNG_BASE64 }).to_string();

        let (status, body) = post_detect(app_with_detections(vec![]), &body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_get_not_allowed() {
        let request = Request::builder()
            .method(Method::GET)
            .uri("/detect")
            .body(Body::empty())
            .unwrap();

        let response = app_with_detections(vec![]).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
