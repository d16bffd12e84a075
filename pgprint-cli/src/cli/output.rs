// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Report formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use pgprint::{AccessError, CommandOutput, Snapshot};

/// Formats command results for the terminal
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format the outcome of one `pgprint` invocation
    pub fn format(output: &CommandOutput) -> String {
        match output {
            CommandOutput::Report(text) => text.clone(),
            CommandOutput::Usage | CommandOutput::NotANode => output.to_string().yellow().to_string(),
        }
    }

    /// Format an access failure
    pub fn format_error(err: &AccessError) -> String {
        format!("Error: {}", err).red().to_string()
    }

    /// Table of the symbols a snapshot defines
    pub fn format_symbols(snapshot: &Snapshot) -> String {
        if snapshot.symbols.is_empty() {
            return format!("{}", "No symbols defined".yellow());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(vec![
            Cell::new("symbol").fg(Color::Green),
            Cell::new("address").fg(Color::Green),
            Cell::new("struct").fg(Color::Green),
        ]);

        for (name, handle) in &snapshot.symbols {
            let type_name = if handle.is_null() {
                "NULL".to_string()
            } else {
                snapshot
                    .object(*handle)
                    .map(|object| object.type_name.clone())
                    .unwrap_or_else(|| "?".to_string())
            };
            table.add_row(vec![name.clone(), handle.to_string(), type_name]);
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pgprint::{FieldValue, Handle, SnapshotBuilder};

    #[test]
    fn test_report_is_printed_verbatim() {
        let output = CommandOutput::Report("\t-> (NULL)".to_string());
        assert_eq!(ReportFormatter::format(&output), "\t-> (NULL)");
    }

    #[test]
    fn test_diagnostics_keep_their_text() {
        assert!(ReportFormatter::format(&CommandOutput::Usage).contains("usage: pgprint var"));
        assert!(ReportFormatter::format(&CommandOutput::NotANode).contains("not a node type"));
        assert!(
            ReportFormatter::format_error(&AccessError::UnknownSymbol("x".to_string()))
                .contains("No symbol \"x\" in current context")
        );
    }

    #[test]
    fn test_symbols_table() {
        let mut builder = SnapshotBuilder::new();
        let var = builder.node("Var", "T_Var", [("varno", FieldValue::Int(1))]);
        builder.symbol("var", var).symbol("nothing", Handle::NULL);
        let table = ReportFormatter::format_symbols(&builder.build());

        assert!(table.contains("var"));
        assert!(table.contains("0x1000"));
        assert!(table.contains("Var"));
        assert!(table.contains("NULL"));
    }
}
