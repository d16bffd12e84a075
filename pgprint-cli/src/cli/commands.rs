// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pgprint")]
#[command(version, about = "Readable dumps of PostgreSQL planner node trees")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Process snapshot to read nodes from
    #[arg(long, short, global = true, env = "PGPRINT_SNAPSHOT")]
    pub snapshot: Option<PathBuf>,

    /// Text inserted once per nesting level (default: a tab)
    #[arg(long, global = true)]
    pub indent_unit: Option<String>,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (overridden by --verbose)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the node an expression evaluates to
    Print {
        /// Expression naming the node: a symbol, an address or NULL
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Interactive console over a snapshot
    Shell,

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
