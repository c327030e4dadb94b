// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Decoding of raw YOLO output tensors into detections
//!
//! Exported YOLOv8/v11 detectors emit one tensor of shape `[1, 4 + C, N]`:
//! for each of the N anchors, the box centre/size in model-input pixels
//! followed by one score per class. No objectness column.

use ndarray::{ArrayViewD, Axis, Ix2};
use std::cmp::Ordering;
use tracing::trace;

use super::preprocessing::Letterbox;
use crate::vision::detector::DetectionError;

/// A candidate box in model-input space, before label resolution
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub xyxy: [f32; 4],
    pub score: f32,
    pub class_id: usize,
}

/// Thresholds applied after inference
#[derive(Debug, Clone, Copy)]
pub struct PostprocessParams {
    pub confidence_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
}

/// Turn the raw output tensor into NMS-filtered candidates
///
/// Candidates are returned by descending score.
pub fn decode_output(
    output: ArrayViewD<f32>,
    params: &PostprocessParams,
) -> Result<Vec<Candidate>, DetectionError> {
    let candidates = extract_candidates(output, params.confidence_threshold)?;
    let mut kept = non_max_suppression(candidates, params.iou_threshold);
    kept.truncate(params.max_detections);
    Ok(kept)
}

/// Pick the best class per anchor and keep those above the threshold
pub fn extract_candidates(
    output: ArrayViewD<f32>,
    confidence_threshold: f32,
) -> Result<Vec<Candidate>, DetectionError> {
    let shape = output.shape().to_vec();
    if shape.len() != 3 || shape[0] != 1 {
        return Err(DetectionError::UnexpectedOutput(format!(
            "expected [1, 4 + classes, anchors], got {:?}",
            shape
        )));
    }

    let plane = output
        .index_axis(Axis(0), 0)
        .into_dimensionality::<Ix2>()
        .map_err(|e| DetectionError::UnexpectedOutput(e.to_string()))?;

    let rows = plane.shape()[0];
    let anchors = plane.shape()[1];
    if rows < 5 {
        return Err(DetectionError::UnexpectedOutput(format!(
            "output has {} rows, need box coordinates plus at least one class",
            rows
        )));
    }

    let mut candidates = Vec::new();
    for i in 0..anchors {
        let mut best_class = 0;
        let mut best_score = f32::MIN;
        for c in 4..rows {
            let score = plane[[c, i]];
            if score > best_score {
                best_score = score;
                best_class = c - 4;
            }
        }

        if best_score < confidence_threshold {
            continue;
        }

        let (cx, cy, w, h) = (plane[[0, i]], plane[[1, i]], plane[[2, i]], plane[[3, i]]);
        candidates.push(Candidate {
            xyxy: [cx - w / 2.0, cy - h / 2.0, cx + w / 2.0, cy + h / 2.0],
            score: best_score,
            class_id: best_class,
        });
    }

    trace!(
        "{} of {} anchors passed confidence threshold {}",
        candidates.len(),
        anchors,
        confidence_threshold
    );

    Ok(candidates)
}

/// Intersection over union of two `[x1, y1, x2, y2]` boxes
pub fn iou(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    let x1 = a[0].max(b[0]);
    let y1 = a[1].max(b[1]);
    let x2 = a[2].min(b[2]);
    let y2 = a[3].min(b[3]);

    if x2 <= x1 || y2 <= y1 {
        return 0.0;
    }

    let intersection = (x2 - x1) * (y2 - y1);
    let area_a = (a[2] - a[0]) * (a[3] - a[1]);
    let area_b = (b[2] - b[0]) * (b[3] - b[1]);
    let union = area_a + area_b - intersection;

    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}

/// Class-aware greedy NMS
///
/// Boxes only suppress boxes of the same class.
pub fn non_max_suppression(candidates: Vec<Candidate>, iou_threshold: f32) -> Vec<Candidate> {
    let mut sorted = candidates;
    sorted.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let mut keep = Vec::new();
    let mut suppressed = vec![false; sorted.len()];

    for i in 0..sorted.len() {
        if suppressed[i] {
            continue;
        }

        for j in (i + 1)..sorted.len() {
            if !suppressed[j]
                && sorted[j].class_id == sorted[i].class_id
                && iou(&sorted[i].xyxy, &sorted[j].xyxy) > iou_threshold
            {
                suppressed[j] = true;
            }
        }

        keep.push(sorted[i].clone());
    }

    keep
}

/// Map candidates back to original image pixels
pub fn restore_candidates(candidates: &mut [Candidate], letterbox: &Letterbox) {
    for candidate in candidates.iter_mut() {
        candidate.xyxy = letterbox.restore_box(candidate.xyxy);
    }
}
