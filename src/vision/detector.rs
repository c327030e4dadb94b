// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Object detector abstraction and the base64-in, detections-out adapter

use image::DynamicImage;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::image_utils::{decode_base64_image, ImageError};

/// Errors raised by the detection adapter
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error(transparent)]
    Decode(#[from] ImageError),

    #[error("Inference failed: {0}")]
    Inference(#[from] ort::Error),

    #[error("Unexpected model output: {0}")]
    UnexpectedOutput(String),

    #[error("Detector session is unavailable")]
    SessionPoisoned,
}

/// One detected object, in original image pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Top-left x
    pub x1: f32,
    /// Top-left y
    pub y1: f32,
    /// Bottom-right x
    pub x2: f32,
    /// Bottom-right y
    pub y2: f32,
    /// Class probability (0.0-1.0)
    pub confidence: f32,
    /// Class index as emitted by the model
    pub class_id: usize,
    /// Human-readable class name
    pub label: String,
}

impl Detection {
    /// Box as `[x1, y1, x2, y2]`
    pub fn xyxy(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// Static facts about a loaded detector, reported by `/health`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorInfo {
    pub name: String,
    pub model_path: String,
    pub input_size: u32,
    pub num_classes: usize,
}

/// A pretrained detector loaded once and shared across requests
///
/// Implementations must be safe to call from several blocking threads;
/// serialising access internally is acceptable.
pub trait ObjectDetector: Send + Sync {
    /// Run one inference pass over a decoded image
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DetectionError>;

    fn info(&self) -> DetectorInfo;
}

/// Decode a base64 image payload and run the detector over it
///
/// Detections come back in the detector's native order.
pub fn detect_base64(
    detector: &dyn ObjectDetector,
    image_data: &str,
) -> Result<Vec<Detection>, DetectionError> {
    let (image, image_info) = decode_base64_image(image_data)?;

    debug!(
        "Decoded image: {}x{}, {} bytes",
        image_info.width, image_info.height, image_info.size_bytes
    );

    detector.detect(&image)
}
