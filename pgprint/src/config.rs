// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Rendering configuration

use crate::render::indent::{indent_with, DEFAULT_INDENT_UNIT};
use serde::{Deserialize, Serialize};

/// Settings that shape the rendered report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Text inserted once per nesting level
    pub indent_unit: String,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    /// Indent every line of `text` by `level` units
    pub fn indent(&self, text: &str, level: usize) -> String {
        indent_with(text, level, &self.indent_unit)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
        }
    }
}
