// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! pgprint CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments first to get log level
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // Can still be overridden by RUST_LOG
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = cli::render_config(cli.indent_unit);

    match cli.command {
        Commands::Version => {
            println!("{} {}", "pgprint".bold().green(), pgprint::VERSION);
            println!("PostgreSQL planner node printer");
            Ok(())
        }

        Commands::Print { args } => cli::handle_print(cli.snapshot, config, args),

        Commands::Shell => cli::handle_shell(cli.snapshot, config),
    }
}
