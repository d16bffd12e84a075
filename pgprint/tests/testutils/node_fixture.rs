//! Test fixture for building planner node trees
//!
//! Wraps a [`SnapshotBuilder`] with constructors for the node types the
//! renderer understands, filled with the fields it reads.

use pgprint::{FieldValue, Handle, RenderConfig, Renderer, Report, Snapshot, SnapshotBuilder};

/// Builds a snapshot one node at a time
pub struct NodeFixture {
    builder: SnapshotBuilder,
}

impl NodeFixture {
    pub fn new() -> Self {
        Self {
            builder: SnapshotBuilder::new(),
        }
    }

    /// Direct access to the underlying builder for unusual shapes
    pub fn builder(&mut self) -> &mut SnapshotBuilder {
        &mut self.builder
    }

    pub fn var(&mut self, varno: i64, varattno: i64) -> Handle {
        self.builder.node(
            "Var",
            "T_Var",
            [
                ("varno", FieldValue::from(varno)),
                ("varattno", FieldValue::from(varattno)),
                ("varlevelsup", FieldValue::from(0_i64)),
            ],
        )
    }

    pub fn constant(&mut self) -> Handle {
        self.builder
            .node("Const", "T_Const", [("consttype", FieldValue::from(23_i64))])
    }

    pub fn target_entry(&mut self, resno: i64, name: Option<&str>, expr: Handle) -> Handle {
        let resname = match name {
            Some(name) => self.builder.string(name),
            None => Handle::NULL,
        };
        self.builder.node(
            "TargetEntry",
            "T_TargetEntry",
            [
                ("expr", FieldValue::from(expr)),
                ("resno", FieldValue::from(resno)),
                ("resname", FieldValue::from(resname)),
                ("resorigtbl", FieldValue::from(16384_i64)),
                ("resorigcol", FieldValue::from(resno)),
                ("resjunk", FieldValue::from(0_i64)),
            ],
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn plan(
        &mut self,
        tag: &str,
        startup_cost: f64,
        total_cost: f64,
        plan_rows: f64,
        plan_width: i64,
        targetlist: Handle,
        lefttree: Handle,
        righttree: Handle,
    ) -> Handle {
        let struct_name = tag.trim_start_matches("T_").to_string();
        self.builder.node(
            &struct_name,
            tag,
            [
                ("startup_cost", FieldValue::from(startup_cost)),
                ("total_cost", FieldValue::from(total_cost)),
                ("plan_rows", FieldValue::from(plan_rows)),
                ("plan_width", FieldValue::from(plan_width)),
                ("targetlist", FieldValue::from(targetlist)),
                ("lefttree", FieldValue::from(lefttree)),
                ("righttree", FieldValue::from(righttree)),
            ],
        )
    }

    /// A plan operator with no target list and no children
    pub fn leaf_plan(&mut self, tag: &str, total_cost: f64, plan_rows: f64) -> Handle {
        self.plan(
            tag,
            0.0,
            total_cost,
            plan_rows,
            4,
            Handle::NULL,
            Handle::NULL,
            Handle::NULL,
        )
    }

    pub fn range_tbl_entry(&mut self, relid: i64, relkind: char) -> Handle {
        self.builder.node(
            "RangeTblEntry",
            "T_RangeTblEntry",
            [
                ("rtekind", FieldValue::label("RTE_RELATION")),
                ("relid", FieldValue::from(relid)),
                ("relkind", FieldValue::from(relkind)),
            ],
        )
    }

    pub fn rel_opt_info(&mut self, relid: i64, rows: f64, width: i64) -> Handle {
        self.builder.node(
            "RelOptInfo",
            "T_RelOptInfo",
            [
                ("reloptkind", FieldValue::label("RELOPT_BASEREL")),
                ("relids", FieldValue::from(Handle::NULL)),
                ("rtekind", FieldValue::label("RTE_RELATION")),
                ("relid", FieldValue::from(relid)),
                ("rows", FieldValue::from(rows)),
                ("width", FieldValue::from(width)),
                ("has_fk_join", FieldValue::from(0_i64)),
            ],
        )
    }

    pub fn op_expr(&mut self, opno: i64, args: &[Handle]) -> Handle {
        let args = self.builder.node_list(args);
        self.builder.node(
            "OpExpr",
            "T_OpExpr",
            [("opno", FieldValue::from(opno)), ("args", FieldValue::from(args))],
        )
    }

    pub fn restrict_info(&mut self, clause: Handle) -> Handle {
        self.builder.node(
            "RestrictInfo",
            "T_RestrictInfo",
            [
                ("clause", FieldValue::from(clause)),
                ("is_pushed_down", FieldValue::from(1_i64)),
                ("outerjoin_delayed", FieldValue::from(0_i64)),
                ("can_join", FieldValue::from(0_i64)),
            ],
        )
    }

    pub fn list(&mut self, nodes: &[Handle]) -> Handle {
        self.builder.node_list(nodes)
    }

    pub fn planner_info(&mut self, rels: &[Handle], rtes: &[Handle]) -> Handle {
        let size = rels.len() as i64 + 1;
        let rel_array = self
            .builder
            .array(std::iter::once(Handle::NULL).chain(rels.iter().copied()));
        let rte_array = self
            .builder
            .array(std::iter::once(Handle::NULL).chain(rtes.iter().copied()));
        self.builder.node(
            "PlannerInfo",
            "T_PlannerInfo",
            [
                ("simple_rel_array", FieldValue::from(rel_array)),
                ("simple_rel_array_size", FieldValue::from(size)),
                ("simple_rte_array", FieldValue::from(rte_array)),
            ],
        )
    }

    pub fn planned_stmt(&mut self, plan_tree: Handle, rtable: &[Handle], oids: &[i64]) -> Handle {
        let rtable = self.builder.node_list(rtable);
        let oids = self.builder.oid_list(oids);
        self.builder.node(
            "PlannedStmt",
            "T_PlannedStmt",
            [
                ("commandType", FieldValue::label("CMD_SELECT")),
                ("queryId", FieldValue::from(0_i64)),
                ("hasReturning", FieldValue::from(0_i64)),
                ("hasModifyingCTE", FieldValue::from(0_i64)),
                ("canSetTag", FieldValue::from(1_i64)),
                ("transientPlan", FieldValue::from(0_i64)),
                ("hasRowSecurity", FieldValue::from(0_i64)),
                ("planTree", FieldValue::from(plan_tree)),
                ("rtable", FieldValue::from(rtable)),
                ("resultRelations", FieldValue::from(Handle::NULL)),
                ("utilityStmt", FieldValue::from(Handle::NULL)),
                ("subplans", FieldValue::from(Handle::NULL)),
                ("relationOids", FieldValue::from(oids)),
                ("nParamExec", FieldValue::from(0_i64)),
            ],
        )
    }

    pub fn symbol(&mut self, name: &str, handle: Handle) {
        self.builder.symbol(name, handle);
    }

    pub fn build(self) -> Snapshot {
        self.builder.build()
    }
}

/// Render `handle` with the default configuration, expecting a node
pub fn render(snapshot: &Snapshot, handle: Handle) -> String {
    render_with(snapshot, handle, &RenderConfig::default())
}

pub fn render_with(snapshot: &Snapshot, handle: Handle, config: &RenderConfig) -> String {
    match Renderer::new(snapshot, config)
        .render(handle)
        .expect("render should not fail")
    {
        Report::Rendered(text) => text,
        Report::NotANode => panic!("{} is not a node", handle),
    }
}
