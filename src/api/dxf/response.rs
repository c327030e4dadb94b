// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DXF response types

use serde::{Deserialize, Serialize};

/// Response carrying the serialized DXF document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DxfResponse {
    pub result: String,
}
