// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! YOLO object detector running on ONNX Runtime

use anyhow::{Context, Result};
use image::DynamicImage;
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

use super::labels::ClassLabels;
use super::postprocessing::{decode_output, restore_candidates, PostprocessParams};
use super::preprocessing::{preprocess_for_yolo, YOLO_INPUT_SIZE};
use crate::vision::detector::{Detection, DetectionError, DetectorInfo, ObjectDetector};

/// Tunables for a YOLO detector
#[derive(Debug, Clone)]
pub struct YoloConfig {
    /// Square model input size
    pub input_size: u32,
    /// Minimum class score kept
    pub confidence_threshold: f32,
    /// IoU above which same-class boxes are suppressed
    pub iou_threshold: f32,
    /// Maximum detections returned per image
    pub max_detections: usize,
    /// ONNX Runtime intra-op threads
    pub intra_threads: usize,
    /// Optional labels file overriding the model's embedded class names
    pub labels_path: Option<String>,
}

impl Default for YoloConfig {
    fn default() -> Self {
        Self {
            input_size: YOLO_INPUT_SIZE,
            confidence_threshold: 0.25,
            iou_threshold: 0.7,
            max_detections: 300,
            intra_threads: 4,
            labels_path: None,
        }
    }
}

impl YoloConfig {
    fn postprocess_params(&self) -> PostprocessParams {
        PostprocessParams {
            confidence_threshold: self.confidence_threshold,
            iou_threshold: self.iou_threshold,
            max_detections: self.max_detections,
        }
    }
}

/// Pretrained YOLO detector
///
/// Loaded once at startup. The session sits behind a mutex, so concurrent
/// requests are served one inference at a time.
pub struct YoloModel {
    session: Arc<Mutex<Session>>,
    input_name: String,
    labels: ClassLabels,
    config: YoloConfig,
    model_path: String,
}

impl std::fmt::Debug for YoloModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoloModel")
            .field("input_name", &self.input_name)
            .field("model_path", &self.model_path)
            .field("classes", &self.labels.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl YoloModel {
    /// Load an exported YOLO ONNX model
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - ONNX Runtime initialization fails
    /// - A configured labels file cannot be read
    pub fn load<P: AsRef<Path>>(model_path: P, config: YoloConfig) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("Detection model not found: {}", model_path.display());
        }

        info!("Loading detection model from {}", model_path.display());

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(config.intra_threads)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .context(format!(
                "Failed to load detection model from {}",
                model_path.display()
            ))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "images".to_string());

        let labels = match config.labels_path {
            Some(ref path) => ClassLabels::from_file(path)?,
            None => Self::embedded_labels(&session),
        };

        if labels.is_empty() {
            warn!("No class names available; labels will be reported as class_<index>");
        }

        debug!(
            "Detection model loaded - input: {}, classes: {}",
            input_name,
            labels.len()
        );
        info!("✅ Detection model loaded successfully (CPU-only)");

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
            labels,
            config,
            model_path: model_path.display().to_string(),
        })
    }

    /// Class names stored by the exporter in the model metadata
    fn embedded_labels(session: &Session) -> ClassLabels {
        let raw = session
            .metadata()
            .and_then(|metadata| metadata.custom("names"));

        match raw {
            Ok(Some(names)) => ClassLabels::from_names_dict(&names),
            Ok(None) => ClassLabels::default(),
            Err(e) => {
                warn!("Failed to read model metadata: {}", e);
                ClassLabels::default()
            }
        }
    }

    pub fn labels(&self) -> &ClassLabels {
        &self.labels
    }

    pub fn config(&self) -> &YoloConfig {
        &self.config
    }
}

impl ObjectDetector for YoloModel {
    fn detect(&self, image: &DynamicImage) -> Result<Vec<Detection>, DetectionError> {
        let (tensor, letterbox) = preprocess_for_yolo(image, self.config.input_size);
        let input_value = Value::from_array(tensor)?;

        let mut candidates = {
            let mut session = self
                .session
                .lock()
                .map_err(|_| DetectionError::SessionPoisoned)?;

            let outputs = session.run(ort::inputs![self.input_name.as_str() => input_value])?;
            let output = outputs[0].try_extract_array::<f32>()?;

            debug!("Detection output shape: {:?}", output.shape());
            decode_output(output.view(), &self.config.postprocess_params())?
        };

        restore_candidates(&mut candidates, &letterbox);

        let detections: Vec<Detection> = candidates
            .into_iter()
            .map(|c| Detection {
                x1: c.xyxy[0],
                y1: c.xyxy[1],
                x2: c.xyxy[2],
                y2: c.xyxy[3],
                confidence: c.score,
                label: self.labels.name(c.class_id),
                class_id: c.class_id,
            })
            .collect();

        debug!("Detected {} objects", detections.len());

        Ok(detections)
    }

    fn info(&self) -> DetectorInfo {
        DetectorInfo {
            name: "yolo".to_string(),
            model_path: self.model_path.clone(),
            input_size: self.config.input_size,
            num_classes: self.labels.len(),
        }
    }
}
