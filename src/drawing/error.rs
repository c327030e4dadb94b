// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Drawing adapter errors

use thiserror::Error;

/// Errors raised while turning line segments into DXF text
#[derive(Debug, Error)]
pub enum DrawingError {
    #[error("Invalid line segment at index {index}: {message}")]
    InvalidSegment { index: usize, message: String },

    #[error("Failed to write DXF document: {0}")]
    Write(#[from] dxf::DxfError),

    #[error("Temporary file error: {0}")]
    TempFile(#[from] std::io::Error),
}

impl DrawingError {
    pub(crate) fn invalid_segment(index: usize, message: impl Into<String>) -> Self {
        DrawingError::InvalidSegment {
            index,
            message: message.into(),
        }
    }
}
