// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YOLO object detection on CPU via ONNX Runtime
//!
//! Components:
//! - `preprocessing` - Letterbox resize and tensor conversion
//! - `postprocessing` - Output decoding, NMS and box restoration
//! - `labels` - Class index to name mapping
//! - `model` - Session loading and the `ObjectDetector` implementation

pub mod labels;
pub mod model;
pub mod postprocessing;
pub mod preprocessing;

pub use labels::ClassLabels;
pub use model::{YoloConfig, YoloModel};
pub use postprocessing::{Candidate, PostprocessParams};
pub use preprocessing::{Letterbox, YOLO_INPUT_SIZE};
