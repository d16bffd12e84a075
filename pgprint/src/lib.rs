// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! pgprint - readable dumps of PostgreSQL planner node trees
//!
//! pgprint takes a handle into the memory of a (possibly live) PostgreSQL
//! backend and turns the node tree behind it into an indented text report,
//! similar in spirit to `EXPLAIN` output.
//!
//! # Features
//!
//! - **Node classification**: reads the `NodeTag` discriminant and maps it
//!   onto the supported node variants
//! - **List walking**: materializes `List` containers of integers, OIDs or nodes
//! - **Variant renderers**: plan trees, target entries, Vars, range table
//!   entries, RelOptInfo, PlannerInfo, PlannedStmt, RestrictInfo and OpExpr
//! - **Pluggable memory access**: everything goes through [`MemoryAccessor`],
//!   with [`Snapshot`] as the bundled in-memory implementation
//!
//! # Usage
//!
//! ```bash
//! # Render the node bound to the `plan` symbol of a snapshot
//! pgprint --snapshot backend.json print plan
//!
//! # Interactive console
//! pgprint --snapshot backend.json shell
//! ```

pub mod accessor;
pub mod command;
pub mod config;
pub mod node;
pub mod render;

pub use accessor::{
    AccessError, AccessResult, FieldValue, Handle, MemoryAccessor, Snapshot, SnapshotBuilder,
    TaggedNode,
};
pub use command::{run_command, split_arguments, CommandOutput};
pub use config::RenderConfig;
pub use node::{classify, is_variant, strip_tag_prefix, walk, Classified, ElementKind, NodeTag, Walked};
pub use render::{indent, Renderer, Report};

/// pgprint version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
