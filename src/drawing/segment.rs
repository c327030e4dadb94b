// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Line segment input parsing

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::DrawingError;

/// A 3D point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for dxf::Point {
    fn from(p: Point3) -> Self {
        dxf::Point::new(p.x, p.y, p.z)
    }
}

/// A straight line between two 3D points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point3,
    pub end: Point3,
}

impl LineSegment {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Read one segment from its JSON form
    ///
    /// Expects `{"start": {"x", "y", "z"}, "end": {"x", "y", "z"}}` with
    /// numeric coordinates. `index` is only used for error messages.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, DrawingError> {
        let start = point_field(index, value, "start")?;
        let end = point_field(index, value, "end")?;
        Ok(Self { start, end })
    }
}

/// Parse every segment, failing on the first malformed one
pub fn parse_segments(values: &[Value]) -> Result<Vec<LineSegment>, DrawingError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| LineSegment::from_value(index, value))
        .collect()
}

fn point_field(index: usize, segment: &Value, name: &str) -> Result<Point3, DrawingError> {
    let point = segment
        .get(name)
        .ok_or_else(|| DrawingError::invalid_segment(index, format!("missing field '{}'", name)))?;

    Ok(Point3 {
        x: coordinate(index, point, name, "x")?,
        y: coordinate(index, point, name, "y")?,
        z: coordinate(index, point, name, "z")?,
    })
}

fn coordinate(index: usize, point: &Value, point_name: &str, axis: &str) -> Result<f64, DrawingError> {
    match point.get(axis) {
        Some(v) => v.as_f64().ok_or_else(|| {
            DrawingError::invalid_segment(
                index,
                format!("field '{}.{}' is not a number: {}", point_name, axis, v),
            )
        }),
        None => Err(DrawingError::invalid_segment(
            index,
            format!("missing field '{}.{}'", point_name, axis),
        )),
    }
}
