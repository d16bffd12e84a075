// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! The `pgprint` command
//!
//! One invocation takes exactly one argument, an expression naming the node
//! to print. Anything else prints the usage line.

use crate::accessor::{AccessResult, MemoryAccessor};
use crate::config::RenderConfig;
use crate::render::{Renderer, Report};
use log::debug;
use std::fmt;

pub const COMMAND_NAME: &str = "pgprint";

pub const USAGE: &str = "usage: pgprint var";

pub const NOT_A_NODE_MESSAGE: &str = "not a node type";

/// What a single invocation produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Wrong number of arguments
    Usage,
    /// The expression evaluated to something that is not a node
    NotANode,
    /// The rendered report
    Report(String),
}

impl CommandOutput {
    pub fn is_report(&self) -> bool {
        matches!(self, CommandOutput::Report(_))
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Usage => write!(f, "{}", USAGE),
            CommandOutput::NotANode => write!(f, "{}", NOT_A_NODE_MESSAGE),
            CommandOutput::Report(text) => write!(f, "{}", text),
        }
    }
}

/// Run one `pgprint` invocation with already split arguments
pub fn run_command(
    accessor: &dyn MemoryAccessor,
    config: &RenderConfig,
    args: &[String],
) -> AccessResult<CommandOutput> {
    let [expr] = args else {
        debug!("{} called with {} arguments", COMMAND_NAME, args.len());
        return Ok(CommandOutput::Usage);
    };

    let handle = accessor.evaluate(expr)?;
    debug!("{} evaluates to {}", expr, handle);

    let renderer = Renderer::new(accessor, config);
    Ok(match renderer.render(handle)? {
        Report::Rendered(text) => CommandOutput::Report(text),
        Report::NotANode => CommandOutput::NotANode,
    })
}

/// Split a command line into arguments.
///
/// Whitespace separates arguments, single and double quotes group them and a
/// backslash escapes the next character. An unterminated quote runs to the
/// end of the line.
pub fn split_arguments(line: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_arg = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (c, quote) {
            ('\\', _) => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                in_arg = true;
            }
            (c, Some(q)) if c == q => quote = None,
            (c, Some(_)) => current.push(c),
            ('\'' | '"', None) => {
                quote = Some(c);
                in_arg = true;
            }
            (c, None) if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            (c, None) => {
                current.push(c);
                in_arg = true;
            }
        }
    }

    if in_arg {
        args.push(current);
    }
    args
}
