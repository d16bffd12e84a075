// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Per-variant field bundles
//!
//! Each supported node variant has a bundle struct. `read` pulls the fields
//! out of memory (recursing through the [`Renderer`] for child nodes and
//! lists) and `format` turns the bundle into text without touching memory.

use super::dispatcher::Renderer;
use crate::accessor::{AccessResult, TaggedNode};
use crate::config::RenderConfig;
use crate::node::{strip_tag_prefix, ElementKind, Walked};

/// Printed in place of the relation id set of a `RelOptInfo`
pub const RELIDS_NOT_IMPLEMENTED: &str = "(not implemented)";

/// Width of the right-aligned labels in the `PlannedStmt` block
const STMT_LABEL_WIDTH: usize = 14;

/// Fields of one node variant
pub trait NodeFields: Sized {
    /// Struct the node is cast to before its fields are read
    const STRUCT_NAME: &'static str;

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self>;

    fn format(&self, config: &RenderConfig) -> String;
}

/// Common header of every plan operator
#[derive(Debug, Clone, PartialEq)]
pub struct PlanFields {
    pub type_name: String,
    pub startup_cost: f64,
    pub total_cost: f64,
    pub plan_rows: f64,
    pub plan_width: i64,
    pub target_list: Walked,
    /// Outer subtree, already rendered
    pub left: String,
    /// Inner subtree, already rendered
    pub right: String,
}

impl NodeFields for PlanFields {
    const STRUCT_NAME: &'static str = "Plan";

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self> {
        let accessor = renderer.accessor();
        let raw_tag = accessor.read_label(node, "type")?;

        Ok(Self {
            type_name: strip_tag_prefix(&raw_tag).to_string(),
            startup_cost: accessor.read_float(node, "startup_cost")?,
            total_cost: accessor.read_float(node, "total_cost")?,
            plan_rows: accessor.read_float(node, "plan_rows")?,
            plan_width: accessor.read_int(node, "plan_width")?,
            target_list: renderer.walk(
                accessor.read_handle(node, "targetlist")?,
                ElementKind::Node,
            )?,
            left: renderer.render_plan_tree(accessor.read_handle(node, "lefttree")?, 0)?,
            right: renderer.render_plan_tree(accessor.read_handle(node, "righttree")?, 0)?,
        })
    }

    fn format(&self, config: &RenderConfig) -> String {
        let unit = &config.indent_unit;
        format!(
            "\n-> {} (cost={:.3}...{:.3} rows={} width={})\n{unit}target list:\n{}\n{unit}{}\n{unit}{}",
            self.type_name,
            self.startup_cost,
            self.total_cost,
            self.plan_rows,
            self.plan_width,
            self.target_list.indented(config, 2),
            self.left,
            self.right,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntryFields {
    pub resno: i64,
    /// `None` when `resname` is a null pointer
    pub resname: Option<String>,
    pub resorigtbl: i64,
    pub resorigcol: i64,
    pub resjunk: bool,
    pub expr: String,
}

impl NodeFields for TargetEntryFields {
    const STRUCT_NAME: &'static str = "TargetEntry";

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self> {
        let accessor = renderer.accessor();
        Ok(Self {
            resno: accessor.read_int(node, "resno")?,
            resname: accessor.read_string(node, "resname")?,
            resorigtbl: accessor.read_int(node, "resorigtbl")?,
            resorigcol: accessor.read_int(node, "resorigcol")?,
            resjunk: accessor.read_flag(node, "resjunk")?,
            expr: renderer.render_node(accessor.read_handle(node, "expr")?, 0)?,
        })
    }

    fn format(&self, _config: &RenderConfig) -> String {
        let name = match &self.resname {
            Some(name) => format!("\"{}\"", name),
            None => "(NULL)".to_string(),
        };
        format!(
            "TargetEntry (resno={} resname={} origtbl={} origcol={} junk={} expr=[{}])",
            self.resno, name, self.resorigtbl, self.resorigcol, self.resjunk, self.expr
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarFields {
    pub varno: i64,
    pub varattno: i64,
    pub varlevelsup: i64,
}

impl NodeFields for VarFields {
    const STRUCT_NAME: &'static str = "Var";

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self> {
        let accessor = renderer.accessor();
        Ok(Self {
            varno: accessor.read_int(node, "varno")?,
            varattno: accessor.read_int(node, "varattno")?,
            varlevelsup: accessor.read_int(node, "varlevelsup")?,
        })
    }

    fn format(&self, _config: &RenderConfig) -> String {
        format!(
            "Var (varno={} varattno={} levelsup={})",
            self.varno, self.varattno, self.varlevelsup
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeTblRefFields {
    pub rtindex: i64,
}

impl NodeFields for RangeTblRefFields {
    const STRUCT_NAME: &'static str = "RangeTblRef";

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self> {
        Ok(Self {
            rtindex: renderer.accessor().read_int(node, "rtindex")?,
        })
    }

    fn format(&self, _config: &RenderConfig) -> String {
        format!("RangeTblRef (rtindex={})", self.rtindex)
    }
}

/// Relation-level planner info. `relids` is a bitmapset and is not decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RelOptInfoFields {
    pub reloptkind: String,
    pub rtekind: String,
    pub relid: i64,
    pub rows: f64,
    pub width: i64,
    pub has_fk_join: bool,
}

impl NodeFields for RelOptInfoFields {
    const STRUCT_NAME: &'static str = "RelOptInfo";

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self> {
        let accessor = renderer.accessor();
        Ok(Self {
            reloptkind: accessor.read_field(node, "reloptkind")?.to_string(),
            rtekind: accessor.read_field(node, "rtekind")?.to_string(),
            relid: accessor.read_int(node, "relid")?,
            rows: accessor.read_float(node, "rows")?,
            width: accessor.read_int(node, "width")?,
            has_fk_join: accessor.read_flag(node, "has_fk_join")?,
        })
    }

    fn format(&self, _config: &RenderConfig) -> String {
        format!(
            "RelOptInfo (kind={} relids={} rtekind={} relid={} rows={} width={} fk={})",
            self.reloptkind,
            RELIDS_NOT_IMPLEMENTED,
            self.rtekind,
            self.relid,
            self.rows,
            self.width,
            self.has_fk_join
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTblEntryFields {
    pub rtekind: String,
    pub relid: i64,
    pub relkind: char,
}

impl NodeFields for RangeTblEntryFields {
    const STRUCT_NAME: &'static str = "RangeTblEntry";

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self> {
        let accessor = renderer.accessor();
        Ok(Self {
            rtekind: accessor.read_field(node, "rtekind")?.to_string(),
            relid: accessor.read_int(node, "relid")?,
            relkind: accessor.read_char(node, "relkind")?,
        })
    }

    fn format(&self, _config: &RenderConfig) -> String {
        format!(
            "RangeTblEntry (kind={} relid={} relkind={})",
            self.rtekind, self.relid, self.relkind
        )
    }
}

/// The per-relation arrays of a `PlannerInfo`, as `(index, rendered node)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerInfoFields {
    pub rels: Vec<(usize, String)>,
    pub rtes: Vec<(usize, String)>,
}

impl NodeFields for PlannerInfoFields {
    const STRUCT_NAME: &'static str = "PlannerInfo";

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self> {
        let accessor = renderer.accessor();
        // Both arrays are sized by simple_rel_array_size; slot 0 is unused.
        let size = accessor.read_int(node, "simple_rel_array_size")?;
        let size = usize::try_from(size).unwrap_or(0);

        Ok(Self {
            rels: renderer.render_array(accessor.read_handle(node, "simple_rel_array")?, size)?,
            rtes: renderer.render_array(accessor.read_handle(node, "simple_rte_array")?, size)?,
        })
    }

    fn format(&self, _config: &RenderConfig) -> String {
        format!(
            "rel:\n{}\nrte:\n{}\n",
            format_entries(&self.rels),
            format_entries(&self.rtes)
        )
    }
}

fn format_entries(entries: &[(usize, String)]) -> String {
    entries
        .iter()
        .map(|(index, node)| format!("{} => {}", index, node))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Output of the planner for one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStmtFields {
    pub command_type: String,
    pub query_id: String,
    pub n_param_exec: String,
    pub has_returning: bool,
    pub has_modifying_cte: bool,
    pub can_set_tag: bool,
    pub transient_plan: bool,
    pub has_row_security: bool,
    pub plan_tree: String,
    pub rtable: Walked,
    pub relation_oids: Walked,
    pub result_relations: Walked,
    pub utility_stmt: String,
    pub subplans: Walked,
}

impl NodeFields for PlannedStmtFields {
    const STRUCT_NAME: &'static str = "PlannedStmt";

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self> {
        let accessor = renderer.accessor();
        Ok(Self {
            command_type: accessor.read_field(node, "commandType")?.to_string(),
            query_id: accessor.read_field(node, "queryId")?.to_string(),
            n_param_exec: accessor.read_field(node, "nParamExec")?.to_string(),
            has_returning: accessor.read_flag(node, "hasReturning")?,
            has_modifying_cte: accessor.read_flag(node, "hasModifyingCTE")?,
            can_set_tag: accessor.read_flag(node, "canSetTag")?,
            transient_plan: accessor.read_flag(node, "transientPlan")?,
            has_row_security: accessor.read_flag(node, "hasRowSecurity")?,
            plan_tree: renderer.render_plan_tree(accessor.read_handle(node, "planTree")?, 0)?,
            rtable: renderer.walk(accessor.read_handle(node, "rtable")?, ElementKind::Node)?,
            relation_oids: renderer.walk(
                accessor.read_handle(node, "relationOids")?,
                ElementKind::ExternalId,
            )?,
            result_relations: renderer.walk(
                accessor.read_handle(node, "resultRelations")?,
                ElementKind::Integer,
            )?,
            utility_stmt: renderer.render_node(accessor.read_handle(node, "utilityStmt")?, 0)?,
            subplans: renderer.walk(accessor.read_handle(node, "subplans")?, ElementKind::Node)?,
        })
    }

    fn format(&self, config: &RenderConfig) -> String {
        let line = |label: &str, value: &dyn std::fmt::Display| {
            format!("{:>width$}: {}", label, value, width = STMT_LABEL_WIDTH)
        };

        [
            line("type", &self.command_type),
            line("query ID", &self.query_id),
            line("param exec", &self.n_param_exec),
            line("returning", &self.has_returning),
            line("modifying CTE", &self.has_modifying_cte),
            line("can set tag", &self.can_set_tag),
            line("transient", &self.transient_plan),
            line("row security", &self.has_row_security),
            " ".repeat(STMT_LABEL_WIDTH + 1),
            line("plan tree", &self.plan_tree),
            format!("{:>width$}:", "range table", width = STMT_LABEL_WIDTH),
            self.rtable.indented(config, 1),
            line("relation OIDs", &self.relation_oids),
            line("result rels", &self.result_relations),
            line("utility stmt", &self.utility_stmt),
            line("subplans", &self.subplans.indented(config, 1)),
        ]
        .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictInfoFields {
    pub is_pushed_down: bool,
    pub can_join: bool,
    pub outerjoin_delayed: bool,
    pub clause: String,
}

impl NodeFields for RestrictInfoFields {
    const STRUCT_NAME: &'static str = "RestrictInfo";

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self> {
        let accessor = renderer.accessor();
        Ok(Self {
            is_pushed_down: accessor.read_flag(node, "is_pushed_down")?,
            can_join: accessor.read_flag(node, "can_join")?,
            outerjoin_delayed: accessor.read_flag(node, "outerjoin_delayed")?,
            clause: renderer.render_node(accessor.read_handle(node, "clause")?, 0)?,
        })
    }

    fn format(&self, config: &RenderConfig) -> String {
        format!(
            "RestrictInfo (pushed_down={} can_join={} delayed={})\n{}",
            self.is_pushed_down,
            self.can_join,
            self.outerjoin_delayed,
            config.indent(&self.clause, 1)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpExprFields {
    pub opno: i64,
    pub args: Walked,
}

impl NodeFields for OpExprFields {
    const STRUCT_NAME: &'static str = "OpExpr";

    fn read(renderer: &Renderer<'_>, node: &TaggedNode) -> AccessResult<Self> {
        let accessor = renderer.accessor();
        Ok(Self {
            opno: accessor.read_int(node, "opno")?,
            args: renderer.walk(accessor.read_handle(node, "args")?, ElementKind::Node)?,
        })
    }

    fn format(&self, config: &RenderConfig) -> String {
        format!(
            "OpExpr (opno={})\n{}",
            self.opno,
            self.args.indented(config, 1)
        )
    }
}
