// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DXF API endpoint module
//!
//! Provides POST /dxf for turning 3D line segments into a DXF document.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::dxf_handler;
pub use request::DxfRequest;
pub use response::DxfResponse;
