// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Node classification and list traversal

pub mod list;
pub mod tag;

pub use list::{walk, ElementKind, Walked, NIL_MARKER};
pub use tag::{classify, is_variant, strip_tag_prefix, Classified, NodeTag};
