// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Node tags and classification
//!
//! Every PostgreSQL node starts with a `NodeTag type` field holding a
//! `T_`-prefixed enum constant. Classification reads that field and maps it
//! onto the closed set of variants the renderer knows about.

use crate::accessor::{Handle, MemoryAccessor};
use log::trace;
use std::fmt;

/// Prefix of every `NodeTag` constant
pub const TAG_PREFIX: &str = "T_";

/// Name of the discriminant field shared by all nodes
pub const TAG_FIELD: &str = "type";

/// Node variants with a dedicated renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Plan,
    TargetEntry,
    Var,
    RangeTblRef,
    RelOptInfo,
    RangeTblEntry,
    PlannerInfo,
    PlannedStmt,
    List,
    RestrictInfo,
    OpExpr,
    Unknown,
}

/// Concrete plan operators. They all embed `Plan` as their first member and
/// are rendered as plan trees.
const PLAN_OPERATORS: &[&str] = &[
    "Result",
    "ProjectSet",
    "ModifyTable",
    "Append",
    "MergeAppend",
    "RecursiveUnion",
    "BitmapAnd",
    "BitmapOr",
    "Scan",
    "SeqScan",
    "SampleScan",
    "IndexScan",
    "IndexOnlyScan",
    "BitmapIndexScan",
    "BitmapHeapScan",
    "TidScan",
    "TidRangeScan",
    "SubqueryScan",
    "FunctionScan",
    "ValuesScan",
    "TableFuncScan",
    "CteScan",
    "NamedTuplestoreScan",
    "WorkTableScan",
    "ForeignScan",
    "CustomScan",
    "Join",
    "NestLoop",
    "MergeJoin",
    "HashJoin",
    "Material",
    "Memoize",
    "Sort",
    "IncrementalSort",
    "Group",
    "Agg",
    "WindowAgg",
    "Unique",
    "Gather",
    "GatherMerge",
    "Hash",
    "SetOp",
    "LockRows",
    "Limit",
];

impl NodeTag {
    /// Variants that are matched by name, in lookup order
    pub const KNOWN: [NodeTag; 11] = [
        NodeTag::Plan,
        NodeTag::TargetEntry,
        NodeTag::Var,
        NodeTag::RangeTblRef,
        NodeTag::RelOptInfo,
        NodeTag::RangeTblEntry,
        NodeTag::PlannerInfo,
        NodeTag::PlannedStmt,
        NodeTag::List,
        NodeTag::RestrictInfo,
        NodeTag::OpExpr,
    ];

    /// Tag name without the `T_` prefix, which is also the C struct name
    pub fn name(self) -> &'static str {
        match self {
            NodeTag::Plan => "Plan",
            NodeTag::TargetEntry => "TargetEntry",
            NodeTag::Var => "Var",
            NodeTag::RangeTblRef => "RangeTblRef",
            NodeTag::RelOptInfo => "RelOptInfo",
            NodeTag::RangeTblEntry => "RangeTblEntry",
            NodeTag::PlannerInfo => "PlannerInfo",
            NodeTag::PlannedStmt => "PlannedStmt",
            NodeTag::List => "List",
            NodeTag::RestrictInfo => "RestrictInfo",
            NodeTag::OpExpr => "OpExpr",
            NodeTag::Unknown => "Node",
        }
    }

    /// Map a raw tag constant (e.g. `T_Var`) onto a variant
    pub fn from_raw(raw: &str) -> NodeTag {
        if let Some(tag) = Self::KNOWN.iter().find(|tag| is_variant(raw, tag.name())) {
            return *tag;
        }
        if PLAN_OPERATORS.iter().any(|op| is_variant(raw, op)) {
            return NodeTag::Plan;
        }
        NodeTag::Unknown
    }
}

impl fmt::Display for NodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of classifying a handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub tag: NodeTag,
    /// The tag constant as stored in memory, e.g. `T_SeqScan`
    pub raw: String,
}

impl Classified {
    /// Tag name with the `T_` prefix removed
    pub fn type_name(&self) -> &str {
        strip_tag_prefix(&self.raw)
    }
}

/// Remove the `T_` prefix from a tag constant, if present
pub fn strip_tag_prefix(raw: &str) -> &str {
    raw.strip_prefix(TAG_PREFIX).unwrap_or(raw)
}

/// Check whether the raw tag constant `raw` names the variant `name`
/// (the `IsA()` test)
pub fn is_variant(raw: &str, name: &str) -> bool {
    raw.strip_prefix(TAG_PREFIX) == Some(name)
}

/// Classify the object behind `handle`.
///
/// Returns `None` for null handles and for objects without a readable tag.
pub fn classify(accessor: &dyn MemoryAccessor, handle: Handle) -> Option<Classified> {
    if accessor.is_null(handle) || !accessor.has_field(handle, TAG_FIELD) {
        return None;
    }

    let node = accessor.cast_to(handle, "Node").ok()?;
    let raw = accessor.read_label(&node, TAG_FIELD).ok()?;
    let tag = NodeTag::from_raw(&raw);
    trace!("{} classified as {} ({})", handle, tag, raw);

    Some(Classified { tag, raw })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::{FieldValue, SnapshotBuilder};

    #[test]
    fn test_strip_tag_prefix() {
        assert_eq!(strip_tag_prefix("T_Var"), "Var");
        assert_eq!(strip_tag_prefix("Var"), "Var");
        assert_eq!(strip_tag_prefix("T_"), "");
    }

    #[test]
    fn test_is_variant() {
        assert!(is_variant("T_Var", "Var"));
        assert!(!is_variant("T_Var", "var"));
        assert!(!is_variant("Var", "Var"));
        assert!(!is_variant("T_VarX", "Var"));
    }

    #[test]
    fn test_from_raw() {
        assert_eq!(NodeTag::from_raw("T_Var"), NodeTag::Var);
        assert_eq!(NodeTag::from_raw("T_Plan"), NodeTag::Plan);
        assert_eq!(NodeTag::from_raw("T_HashJoin"), NodeTag::Plan);
        assert_eq!(NodeTag::from_raw("T_List"), NodeTag::List);
        assert_eq!(NodeTag::from_raw("T_IntList"), NodeTag::Unknown);
        assert_eq!(NodeTag::from_raw("T_Const"), NodeTag::Unknown);
        assert_eq!(NodeTag::from_raw("SeqScan"), NodeTag::Unknown);
    }

    #[test]
    fn test_classify() {
        let mut builder = SnapshotBuilder::new();
        let var = builder.node("Var", "T_Var", []);
        let cell = builder.object("ListCell", [("next", FieldValue::Ptr(Handle::NULL))]);
        let odd = builder.object("Weird", [("type", FieldValue::Int(3))]);
        let snapshot = builder.build();

        let classified = classify(&snapshot, var).unwrap();
        assert_eq!(classified.tag, NodeTag::Var);
        assert_eq!(classified.type_name(), "Var");

        assert_eq!(classify(&snapshot, Handle::NULL), None);
        assert_eq!(classify(&snapshot, cell), None);
        assert_eq!(classify(&snapshot, odd), None);
        assert_eq!(classify(&snapshot, Handle(0xdead)), None);
    }
}
