// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision processing for the detection endpoint
//!
//! This module provides:
//! - Base64 image decoding
//! - The `ObjectDetector` seam used by the HTTP layer
//! - A YOLO detector backed by ONNX Runtime (CPU only)

pub mod detector;
pub mod image_utils;
pub mod yolo;

pub use detector::{detect_base64, Detection, DetectionError, DetectorInfo, ObjectDetector};
pub use image_utils::{decode_base64_image, decode_image_bytes, ImageError, ImageInfo};
pub use yolo::{ClassLabels, YoloConfig, YoloModel};
