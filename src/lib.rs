// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod drawing;
pub mod version;
pub mod vision;

pub use api::{create_app, ApiError, AppState};
pub use config::ServerConfig;
pub use drawing::{DrawingError, DxfWriter, LineSegment, Point3};
pub use vision::{Detection, DetectionError, ObjectDetector, YoloConfig, YoloModel};
