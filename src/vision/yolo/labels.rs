// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Class index to name resolution for YOLO models

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

/// Mapping from model class index to a human-readable name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassLabels {
    names: BTreeMap<usize, String>,
}

impl ClassLabels {
    pub fn new(names: BTreeMap<usize, String>) -> Self {
        Self { names }
    }

    /// Parse the `names` entry Ultralytics embeds in exported ONNX metadata
    ///
    /// Format: `{0: 'person', 1: 'bicycle', ...}`; names may use either quote.
    pub fn from_names_dict(raw: &str) -> Self {
        let pattern = Regex::new(r#"(\d+)\s*:\s*(?:'([^']*)'|"([^"]*)")"#)
            .expect("class name pattern is valid");

        let names = pattern
            .captures_iter(raw)
            .filter_map(|caps| {
                let index = caps.get(1)?.as_str().parse::<usize>().ok()?;
                let name = caps.get(2).or_else(|| caps.get(3))?.as_str().to_string();
                Some((index, name))
            })
            .collect();

        Self { names }
    }

    /// Parse a labels file: either a names dict or one name per line
    pub fn from_text(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            return Self::from_names_dict(content);
        }

        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, name)| (i, name.to_string()))
            .collect();

        Self { names }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read labels file {}", path.display()))?;
        Ok(Self::from_text(&content))
    }

    /// Name for a class index, `class_<index>` when unknown
    pub fn name(&self, class_id: usize) -> String {
        self.names
            .get(&class_id)
            .cloned()
            .unwrap_or_else(|| format!("class_{}", class_id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
