// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Detection request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;

/// Fixed message for an absent or empty `image_data`
pub const MISSING_IMAGE_DATA: &str = "Missing image data";

/// Request for object detection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectRequest {
    /// Base64-encoded image data
    #[serde(default)]
    pub image_data: Option<String>,
}

impl DetectRequest {
    /// Return the image payload, or the validation error if there is none
    pub fn validate(&self) -> Result<&str, ApiError> {
        match self.image_data.as_deref() {
            Some(data) if !data.is_empty() => Ok(data),
            _ => Err(ApiError::ValidationError(MISSING_IMAGE_DATA.to_string())),
        }
    }
}
