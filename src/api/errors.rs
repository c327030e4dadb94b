// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::drawing::DrawingError;
use crate::vision::{DetectionError, ImageError};

/// JSON body of every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every failure a handler can report
///
/// The carried message is sent to the client verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// A required body field is absent or empty
    ValidationError(String),
    /// The body could not be read as the expected JSON shape
    InvalidRequest(String),
    /// The image payload could not be decoded
    DecodeError(String),
    /// The detector failed
    InferenceError(String),
    /// A line segment is malformed
    GeometryError(String),
    /// The drawing could not be written or read back
    SerializationError(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(msg)
            | ApiError::InvalidRequest(msg)
            | ApiError::DecodeError(msg)
            | ApiError::InferenceError(msg)
            | ApiError::GeometryError(msg)
            | ApiError::SerializationError(msg) => msg,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError(_) | ApiError::InvalidRequest(_) => 400,
            ApiError::DecodeError(_)
            | ApiError::InferenceError(_)
            | ApiError::GeometryError(_)
            | ApiError::SerializationError(_) => 500,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.message().to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}

impl From<DetectionError> for ApiError {
    fn from(err: DetectionError) -> Self {
        match err {
            DetectionError::Decode(_) => ApiError::DecodeError(err.to_string()),
            _ => ApiError::InferenceError(err.to_string()),
        }
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        ApiError::DecodeError(err.to_string())
    }
}

impl From<DrawingError> for ApiError {
    fn from(err: DrawingError) -> Self {
        match err {
            DrawingError::InvalidSegment { .. } => ApiError::GeometryError(err.to_string()),
            _ => ApiError::SerializationError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}
