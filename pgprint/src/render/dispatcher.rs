// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Top-level node dispatch
//!
//! The [`Renderer`] classifies a handle, looks its tag up in the dispatch
//! table and runs the matching variant renderer. Child nodes and lists are
//! rendered by calling back into the same renderer.

use super::variants::{
    NodeFields, OpExprFields, PlanFields, PlannedStmtFields, PlannerInfoFields,
    RangeTblEntryFields, RangeTblRefFields, RelOptInfoFields, RestrictInfoFields,
    TargetEntryFields, VarFields,
};
use crate::accessor::{AccessResult, Handle, MemoryAccessor};
use crate::config::RenderConfig;
use crate::node::{classify, list, Classified, ElementKind, NodeTag, Walked};
use log::{debug, warn};

/// Rendering of a null node pointer
pub const NULL_MARKER: &str = "(NULL)";

/// Rendering of a null plan subtree
pub const NULL_PLAN_MARKER: &str = "-> (NULL)";

/// Rendering of a nested pointer that does not lead to a node
pub const NOT_A_NODE_MARKER: &str = "(not a node)";

/// Outcome of rendering a top-level handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// The handle was null or a recognized node
    Rendered(String),
    /// The handle points at something without a node tag
    NotANode,
}

impl Report {
    pub fn is_node(&self) -> bool {
        matches!(self, Report::Rendered(_))
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Report::Rendered(text) => Some(text),
            Report::NotANode => None,
        }
    }
}

/// Renders the node behind a classified handle, without outer indentation
pub type RenderFn = fn(&Renderer<'_>, &Classified, Handle) -> AccessResult<String>;

/// Dispatch table from node tag to variant renderer
pub fn renderer_for(tag: NodeTag) -> RenderFn {
    match tag {
        NodeTag::Plan => render_plan,
        NodeTag::TargetEntry => render_fields::<TargetEntryFields>,
        NodeTag::Var => render_fields::<VarFields>,
        NodeTag::RangeTblRef => render_fields::<RangeTblRefFields>,
        NodeTag::RelOptInfo => render_fields::<RelOptInfoFields>,
        NodeTag::RangeTblEntry => render_fields::<RangeTblEntryFields>,
        NodeTag::PlannerInfo => render_fields::<PlannerInfoFields>,
        NodeTag::PlannedStmt => render_fields::<PlannedStmtFields>,
        NodeTag::List => render_list,
        NodeTag::RestrictInfo => render_fields::<RestrictInfoFields>,
        NodeTag::OpExpr => render_fields::<OpExprFields>,
        NodeTag::Unknown => render_unknown,
    }
}

fn render_plan(renderer: &Renderer<'_>, _: &Classified, handle: Handle) -> AccessResult<String> {
    renderer.render_plan_tree(handle, 0)
}

fn render_fields<T: NodeFields>(
    renderer: &Renderer<'_>,
    _: &Classified,
    handle: Handle,
) -> AccessResult<String> {
    let node = renderer.accessor().cast_to(handle, T::STRUCT_NAME)?;
    Ok(T::read(renderer, &node)?.format(renderer.config()))
}

fn render_list(renderer: &Renderer<'_>, _: &Classified, handle: Handle) -> AccessResult<String> {
    Ok(renderer.walk(handle, ElementKind::Node)?.to_string())
}

fn render_unknown(_: &Renderer<'_>, classified: &Classified, _: Handle) -> AccessResult<String> {
    Ok(classified.type_name().to_string())
}

/// Renders node trees read through a [`MemoryAccessor`]
pub struct Renderer<'a> {
    accessor: &'a dyn MemoryAccessor,
    config: &'a RenderConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(accessor: &'a dyn MemoryAccessor, config: &'a RenderConfig) -> Self {
        Self { accessor, config }
    }

    pub fn accessor(&self) -> &'a dyn MemoryAccessor {
        self.accessor
    }

    pub fn config(&self) -> &'a RenderConfig {
        self.config
    }

    /// Render the node at `handle` as a complete report.
    ///
    /// A null handle renders as `(NULL)`; a non-null handle without a node
    /// tag yields [`Report::NotANode`].
    pub fn render(&self, handle: Handle) -> AccessResult<Report> {
        if self.accessor.is_null(handle) {
            return Ok(Report::Rendered(NULL_MARKER.to_string()));
        }

        match classify(self.accessor, handle) {
            Some(classified) => {
                debug!("rendering {} at {}", classified.raw, handle);
                Ok(Report::Rendered(self.dispatch(&classified, handle)?))
            }
            None => {
                debug!("{} does not carry a node tag", handle);
                Ok(Report::NotANode)
            }
        }
    }

    /// Render a nested node pointer, indented by `indent` levels
    pub fn render_node(&self, handle: Handle, indent: usize) -> AccessResult<String> {
        let text = if self.accessor.is_null(handle) {
            NULL_MARKER.to_string()
        } else {
            match classify(self.accessor, handle) {
                Some(classified) => self.dispatch(&classified, handle)?,
                None => {
                    warn!("{} does not carry a node tag", handle);
                    NOT_A_NODE_MARKER.to_string()
                }
            }
        };

        Ok(self.config.indent(&text, indent))
    }

    /// Render a plan subtree. The block always starts on a new line and is
    /// indented one level deeper than `indent`.
    pub fn render_plan_tree(&self, handle: Handle, indent: usize) -> AccessResult<String> {
        if self.accessor.is_null(handle) {
            return Ok(NULL_PLAN_MARKER.to_string());
        }

        let node = self.accessor.cast_to(handle, PlanFields::STRUCT_NAME)?;
        let plan = PlanFields::read(self, &node)?;
        Ok(self.config.indent(&plan.format(self.config), indent + 1))
    }

    /// Walk a list, rendering node members at indent 0
    pub fn walk(&self, list: Handle, kind: ElementKind) -> AccessResult<Walked> {
        list::walk(self.accessor, list, kind, |member| self.render_node(member, 0))
    }

    /// Render slots `1..size` of a pointer array as `(index, node)` pairs.
    /// A null array has no entries.
    pub fn render_array(&self, array: Handle, size: usize) -> AccessResult<Vec<(usize, String)>> {
        if self.accessor.is_null(array) {
            return Ok(Vec::new());
        }

        (1..size)
            .map(|index| -> AccessResult<(usize, String)> {
                let element = self.accessor.read_array_element(array, index)?;
                Ok((index, self.render_node(element, 0)?))
            })
            .collect()
    }

    fn dispatch(&self, classified: &Classified, handle: Handle) -> AccessResult<String> {
        renderer_for(classified.tag)(self, classified, handle)
    }
}
