// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Access to the memory of the inspected backend
//!
//! The renderer never touches memory directly. Every field read, cast, string
//! dereference and list walk goes through the [`MemoryAccessor`] trait, so the
//! same rendering code works against a debugger session or a [`Snapshot`].

pub mod snapshot;
pub mod traits;
pub mod types;

pub use snapshot::{Snapshot, SnapshotBuilder, SnapshotObject};
pub use traits::{LinkedCells, MemoryAccessor};
pub use types::{AccessError, AccessResult, FieldValue, Handle, TaggedNode};
