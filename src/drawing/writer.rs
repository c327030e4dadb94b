// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DXF document construction and text serialization

use dxf::entities::{Entity, EntityType, Line};
use dxf::enums::AcadVersion;
use dxf::Drawing;
use serde_json::Value;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;

use super::error::DrawingError;
use super::segment::{parse_segments, LineSegment};

/// Builds DXF documents from line segments and renders them as text
///
/// Rendering goes through a uniquely named temporary `.dxf` file that is
/// removed before `render` returns, on success and on failure.
#[derive(Debug, Clone)]
pub struct DxfWriter {
    version: AcadVersion,
    temp_dir: Option<PathBuf>,
}

impl Default for DxfWriter {
    fn default() -> Self {
        Self {
            version: AcadVersion::R2010,
            temp_dir: None,
        }
    }
}

impl DxfWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place temporary files in `dir` instead of the system temp directory
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn temp_dir(&self) -> Option<&PathBuf> {
        self.temp_dir.as_ref()
    }

    /// Build an in-memory drawing with one LINE entity per segment
    pub fn build_drawing(&self, segments: &[LineSegment]) -> Drawing {
        let mut drawing = Drawing::new();
        drawing.header.version = self.version;

        for segment in segments {
            let line = Line::new(segment.start.into(), segment.end.into());
            drawing.add_entity(Entity::new(EntityType::Line(line)));
        }

        drawing
    }

    /// Serialize segments to DXF text
    pub fn render(&self, segments: &[LineSegment]) -> Result<String, DrawingError> {
        let drawing = self.build_drawing(segments);

        let builder = {
            let mut builder = tempfile::Builder::new();
            builder.prefix("drawing-").suffix(".dxf");
            builder
        };
        let mut temp_file = match self.temp_dir {
            Some(ref dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };

        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            drawing.save(&mut writer)?;
            writer.flush()?;
        }

        let content = std::fs::read_to_string(temp_file.path())?;
        temp_file.close()?;

        debug!(
            "Rendered {} lines into {} bytes of DXF",
            segments.len(),
            content.len()
        );

        Ok(content)
    }

    /// Parse raw JSON segments and render them
    ///
    /// A malformed segment aborts the whole call.
    pub fn draw_lines(&self, lines: &[Value]) -> Result<String, DrawingError> {
        let segments = parse_segments(lines)?;
        self.render(&segments)
    }
}
