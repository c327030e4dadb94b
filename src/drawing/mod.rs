// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DXF drawing generation for the `/dxf` endpoint

pub mod error;
pub mod segment;
pub mod writer;

pub use error::DrawingError;
pub use segment::{parse_segments, LineSegment, Point3};
pub use writer::DxfWriter;
