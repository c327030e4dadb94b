// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Parser;
use std::{env, sync::Arc};
use tracing::info;
use vision_cad_node::{
    api::{start_server, AppState},
    cli::Cli,
    drawing::DxfWriter,
    version,
    vision::YoloModel,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("🚀 Starting {}", version::get_version_string());

    let cli = Cli::parse();
    let config = cli.load_config()?;
    let addr = config.bind_addr()?;

    // The detector is loaded once, before the first request is accepted
    info!("🧠 Loading detection model from {}", config.model_path);
    let model_path = config.model_path.clone();
    let yolo_config = config.yolo_config();
    let detector = tokio::task::spawn_blocking(move || YoloModel::load(&model_path, yolo_config))
        .await
        .context("Detection model loader panicked")??;

    let mut dxf_writer = DxfWriter::new();
    if let Some(ref dir) = config.dxf_temp_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create DXF temp dir {}", dir))?;
        dxf_writer = dxf_writer.with_temp_dir(dir);
    }

    let state = AppState::new(Arc::new(detector), dxf_writer);

    start_server(addr, state).await
}
