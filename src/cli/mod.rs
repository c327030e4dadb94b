// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;

use crate::config::ServerConfig;

/// Vision CAD node: object detection and DXF generation over HTTP
#[derive(Parser, Debug, Default)]
#[command(name = "vision-cad-node")]
#[command(version)]
#[command(about = "Serves POST /detect and POST /dxf", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, env = "CONFIG_PATH")]
    pub config: Option<String>,

    /// Listen host
    #[arg(long, env = "API_HOST")]
    pub host: Option<String>,

    /// Listen port
    #[arg(long, env = "API_PORT")]
    pub port: Option<u16>,

    /// Path to the exported YOLO ONNX model
    #[arg(long, env = "MODEL_PATH")]
    pub model_path: Option<String>,

    /// Optional class names file (one per line, or a names dict)
    #[arg(long, env = "LABELS_PATH")]
    pub labels_path: Option<String>,

    /// Minimum detection confidence
    #[arg(long, env = "CONFIDENCE_THRESHOLD")]
    pub confidence_threshold: Option<f32>,

    /// NMS IoU threshold
    #[arg(long, env = "IOU_THRESHOLD")]
    pub iou_threshold: Option<f32>,

    /// Maximum detections per image
    #[arg(long, env = "MAX_DETECTIONS")]
    pub max_detections: Option<usize>,

    /// ONNX Runtime intra-op threads
    #[arg(long, env = "INTRA_THREADS")]
    pub intra_threads: Option<usize>,

    /// Directory for DXF temporary files
    #[arg(long, env = "DXF_TEMP_DIR")]
    pub dxf_temp_dir: Option<String>,
}

impl Cli {
    /// Resolve the effective configuration
    ///
    /// Defaults, then the config file if given, then flags/env overrides.
    pub fn load_config(&self) -> Result<ServerConfig> {
        let base = match self.config {
            Some(ref path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        Ok(self.apply(base))
    }

    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(ref host) = self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(ref model_path) = self.model_path {
            config.model_path = model_path.clone();
        }
        if self.labels_path.is_some() {
            config.labels_path = self.labels_path.clone();
        }
        if let Some(threshold) = self.confidence_threshold {
            config.confidence_threshold = threshold;
        }
        if let Some(threshold) = self.iou_threshold {
            config.iou_threshold = threshold;
        }
        if let Some(max) = self.max_detections {
            config.max_detections = max;
        }
        if let Some(threads) = self.intra_threads {
            config.intra_threads = threads;
        }
        if self.dxf_temp_dir.is_some() {
            config.dxf_temp_dir = self.dxf_temp_dir.clone();
        }
        config
    }
}
