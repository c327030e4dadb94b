// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection response types

use serde::{Deserialize, Serialize};

use crate::vision::Detection;

/// One detected object as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectionRecord {
    /// Class probability (0.0-1.0)
    #[serde(rename = "Confidence")]
    pub confidence: f32,
    /// Class name
    #[serde(rename = "Object")]
    pub label: String,
    /// `[x1, y1, x2, y2]` in original image pixels
    #[serde(rename = "BoxCoordinate")]
    pub box_coordinate: [f32; 4],
}

impl From<Detection> for DetectionRecord {
    fn from(detection: Detection) -> Self {
        Self {
            confidence: detection.confidence,
            box_coordinate: detection.xyxy(),
            label: detection.label,
        }
    }
}
