// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DXF request types and validation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::errors::ApiError;

/// Fixed message for an absent or empty `lines`
pub const MISSING_LINES_DATA: &str = "Missing lines data";

/// Request for DXF generation
///
/// Segments stay as raw JSON here so a malformed entry surfaces as a
/// geometry failure from the drawing adapter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DxfRequest {
    #[serde(default)]
    pub lines: Option<Vec<Value>>,
}

impl DxfRequest {
    /// Consume the request, returning the segments or the validation error
    pub fn into_lines(self) -> Result<Vec<Value>, ApiError> {
        match self.lines {
            Some(lines) if !lines.is_empty() => Ok(lines),
            _ => Err(ApiError::ValidationError(MISSING_LINES_DATA.to_string())),
        }
    }
}
