// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! DXF output read back through a DXF reader

use dxf::entities::EntityType;
use dxf::enums::AcadVersion;
use dxf::Drawing;
use serde_json::json;
use vision_cad_node::drawing::{DrawingError, DxfWriter, LineSegment, Point3};

fn read_back(text: &str) -> Drawing {
    Drawing::load(&mut text.as_bytes()).expect("generated DXF should load")
}

#[test]
fn test_version_and_entities_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let writer = DxfWriter::new().with_temp_dir(dir.path());

    let segments = vec![
        LineSegment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0)),
        LineSegment::new(Point3::new(10.0, 0.0, 0.0), Point3::new(10.0, 10.0, 0.0)),
        LineSegment::new(Point3::new(10.0, 10.0, 0.0), Point3::new(0.0, 0.0, 5.5)),
    ];

    let text = writer.render(&segments).unwrap();
    let drawing = read_back(&text);

    assert_eq!(drawing.header.version, AcadVersion::R2010);

    let lines: Vec<_> = drawing
        .entities()
        .filter_map(|e| match e.specific {
            EntityType::Line(ref line) => Some(line.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(lines.len(), segments.len());

    for (line, segment) in lines.iter().zip(&segments) {
        assert_eq!(line.p1, dxf::Point::from(segment.start));
        assert_eq!(line.p2, dxf::Point::from(segment.end));
    }
}

#[test]
fn test_degenerate_segment_is_written() {
    let writer = DxfWriter::new();
    let text = writer
        .draw_lines(&[json!({
            "start": {"x": 1.0, "y": 1.0, "z": 1.0},
            "end": {"x": 1.0, "y": 1.0, "z": 1.0}
        })])
        .unwrap();

    assert_eq!(read_back(&text).entities().count(), 1);
}

#[test]
fn test_integer_coordinates_accepted() {
    let writer = DxfWriter::new();
    let text = writer
        .draw_lines(&[json!({
            "start": {"x": 0, "y": 0, "z": 0},
            "end": {"x": 3, "y": 4, "z": 0}
        })])
        .unwrap();

    let drawing = read_back(&text);
    let line = drawing
        .entities()
        .find_map(|e| match e.specific {
            EntityType::Line(ref line) => Some(line.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(line.p2, dxf::Point::new(3.0, 4.0, 0.0));
}

#[test]
fn test_non_numeric_coordinate_rejected() {
    let err = DxfWriter::new()
        .draw_lines(&[json!({
            "start": {"x": "zero", "y": 0, "z": 0},
            "end": {"x": 1, "y": 1, "z": 1}
        })])
        .unwrap_err();

    match err {
        DrawingError::InvalidSegment { index, message } => {
            assert_eq!(index, 0);
            assert!(message.contains("start.x"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
