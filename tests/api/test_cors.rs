// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Cross-origin access tests
//!
//! Any origin must be able to call both endpoints, including error responses.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use image::DynamicImage;
use std::sync::Arc;
use tower::util::ServiceExt; // for `oneshot`
use vision_cad_node::{
    api::{create_app, AppState},
    drawing::DxfWriter,
    vision::{Detection, DetectionError, DetectorInfo, ObjectDetector},
};

struct EmptyDetector;

impl ObjectDetector for EmptyDetector {
    fn detect(&self, _image: &DynamicImage) -> Result<Vec<Detection>, DetectionError> {
        Ok(vec![])
    }

    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            name: "empty".to_string(),
            model_path: String::new(),
            input_size: 640,
            num_classes: 0,
        }
    }
}

fn test_app() -> Router {
    create_app(AppState::new(Arc::new(EmptyDetector), DxfWriter::new()))
}

#[cfg(test)]
mod cors_tests {
    use super::*;

    #[tokio::test]
    async fn test_simple_request_allows_any_origin() {
        for uri in ["/detect", "/dxf"] {
            let request = Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::ORIGIN, "http://frontend.example")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap();

            let response = test_app().oneshot(request).await.unwrap();

            // Validation errors still carry the CORS header
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                response
                    .headers()
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .unwrap(),
                "*",
                "missing allow-origin on {}",
                uri
            );
        }
    }

    #[tokio::test]
    async fn test_preflight_request() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/dxf")
            .header(header::ORIGIN, "https://another-origin.test")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
        assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
    }
}
