// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! List walking
//!
//! Turns a `List` into a materialized sequence. The cells themselves come
//! from [`MemoryAccessor::list_cells`]; this module only decides how each
//! cell payload is read and how the result is printed.

use crate::accessor::{AccessResult, Handle, MemoryAccessor};
use crate::config::RenderConfig;
use log::debug;
use std::fmt;

/// Marker printed for a `NIL` list
pub const NIL_MARKER: &str = "(NIL)";

/// How the payload of each list cell is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `int_value`
    Integer,
    /// `oid_value`
    ExternalId,
    /// `ptr_value`, rendered recursively
    Node,
}

impl ElementKind {
    /// Name of the `ListCell` payload member for this kind
    pub fn payload_field(self) -> &'static str {
        match self {
            ElementKind::Integer => "int_value",
            ElementKind::ExternalId => "oid_value",
            ElementKind::Node => "ptr_value",
        }
    }
}

/// A fully walked list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Walked {
    Nil,
    Scalars(Vec<i64>),
    Nodes(Vec<String>),
}

impl Walked {
    pub fn is_nil(&self) -> bool {
        matches!(self, Walked::Nil)
    }

    pub fn len(&self) -> usize {
        match self {
            Walked::Nil => 0,
            Walked::Scalars(values) => values.len(),
            Walked::Nodes(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render indented by `level` units. `NIL` is never indented.
    pub fn indented(&self, config: &RenderConfig, level: usize) -> String {
        match self {
            Walked::Nil => NIL_MARKER.to_string(),
            walked => config.indent(&walked.to_string(), level),
        }
    }
}

/// Scalars print as `[1, 2, 3]`, nodes one per line.
impl fmt::Display for Walked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Walked::Nil => write!(f, "{}", NIL_MARKER),
            Walked::Scalars(values) => {
                let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "[{}]", items.join(", "))
            }
            Walked::Nodes(nodes) => write!(f, "{}", nodes.join("\n")),
        }
    }
}

/// Walk the list at `list`, reading each payload as `kind`.
///
/// Node payloads are handed to `render_node`, which is how the dispatcher
/// recurses into list members.
pub fn walk<F>(
    accessor: &dyn MemoryAccessor,
    list: Handle,
    kind: ElementKind,
    mut render_node: F,
) -> AccessResult<Walked>
where
    F: FnMut(Handle) -> AccessResult<String>,
{
    if accessor.is_null(list) {
        return Ok(Walked::Nil);
    }

    let field = kind.payload_field();
    let mut scalars = Vec::new();
    let mut nodes = Vec::new();

    for cell in accessor.list_cells(list)? {
        let cell = cell?;
        match kind {
            ElementKind::Integer | ElementKind::ExternalId => {
                scalars.push(accessor.read_int(&cell, field)?);
            }
            ElementKind::Node => {
                let member = accessor.read_handle(&cell, field)?;
                nodes.push(render_node(member)?);
            }
        }
    }

    debug!(
        "walked {:?} list at {}: {} elements",
        kind,
        list,
        scalars.len() + nodes.len()
    );

    Ok(match kind {
        ElementKind::Node => Walked::Nodes(nodes),
        ElementKind::Integer | ElementKind::ExternalId => Walked::Scalars(scalars),
    })
}
