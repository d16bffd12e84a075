// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Text rendering of node trees
//!
//! This module turns classified nodes into the indented report. It contains
//! the indentation helpers, the per-variant field bundles and the dispatcher
//! that ties them together.

pub mod dispatcher;
pub mod indent;
pub mod variants;

pub use dispatcher::{renderer_for, RenderFn, Renderer, Report, NULL_MARKER, NULL_PLAN_MARKER};
pub use indent::{indent, indent_with};
pub use variants::NodeFields;
