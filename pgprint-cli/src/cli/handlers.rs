// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for pgprint

use colored::Colorize;
use log::{debug, info};
use rustyline::{error::ReadlineError, CompletionType, Config, EditMode, Editor};
use std::path::{Path, PathBuf};

use super::output::ReportFormatter;
use pgprint::command::COMMAND_NAME;
use pgprint::{run_command, split_arguments, RenderConfig, Snapshot};

const HISTORY_PATH: &str = ".pgprint/history.txt";

/// Build the render configuration from command-line options
pub fn render_config(indent_unit: Option<String>) -> RenderConfig {
    match indent_unit {
        Some(unit) => RenderConfig::new().with_indent_unit(unit),
        None => RenderConfig::default(),
    }
}

/// Handle the print command (one-off invocation)
pub fn handle_print(
    snapshot: Option<PathBuf>,
    config: RenderConfig,
    args: Vec<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(snapshot)?;

    match run_command(&snapshot, &config, &args) {
        Ok(output) => {
            println!("{}", ReportFormatter::format(&output));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", ReportFormatter::format_error(&e));
            Err(e.into())
        }
    }
}

/// Handle the shell (REPL) command
pub fn handle_shell(
    snapshot: Option<PathBuf>,
    config: RenderConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(snapshot)?;

    println!("{}", "pgprint".bold().green());
    println!("Type 'help' for commands, 'exit' or 'quit' to exit\n");

    let rl_config = Config::builder()
        .edit_mode(EditMode::Emacs)
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .auto_add_history(false)
        .build();

    let mut rl = Editor::<(), _>::with_config(rl_config)?;

    if let Some(parent) = Path::new(HISTORY_PATH).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.load_history(HISTORY_PATH);

    loop {
        let prompt = format!("{}> ", COMMAND_NAME.cyan());
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "exit" | "quit" => {
                println!("{}", "Goodbye!".green());
                break;
            }
            "help" => {
                print_help();
                continue;
            }
            "symbols" => {
                println!("{}", ReportFormatter::format_symbols(&snapshot));
                continue;
            }
            "" => continue,
            _ => {}
        }

        rl.add_history_entry(trimmed)?;

        let mut args = split_arguments(trimmed);
        // Accept both `pgprint plan` and plain `plan`
        if args.first().map(String::as_str) == Some(COMMAND_NAME) {
            args.remove(0);
        }

        match run_command(&snapshot, &config, &args) {
            Ok(output) => println!("{}", ReportFormatter::format(&output)),
            Err(e) => eprintln!("{}", ReportFormatter::format_error(&e)),
        }
    }

    let _ = rl.save_history(HISTORY_PATH);

    Ok(())
}

/// Load the snapshot named on the command line
fn load_snapshot(path: Option<PathBuf>) -> Result<Snapshot, Box<dyn std::error::Error>> {
    let path = path.ok_or("No snapshot given. Use --snapshot or set PGPRINT_SNAPSHOT.")?;
    if !path.exists() {
        return Err(format!("Snapshot not found at {:?}", path).into());
    }

    debug!("Using snapshot {:?}", path);
    let snapshot = Snapshot::load(&path)
        .map_err(|e| format!("Failed to load snapshot {:?}: {}", path, e))?;
    info!("Loaded {} objects from {:?}", snapshot.objects.len(), path);

    Ok(snapshot)
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  pgprint <expr>   Print the node <expr> evaluates to");
    println!("  <expr>           Same as 'pgprint <expr>'");
    println!("  symbols          List the symbols in the snapshot");
    println!("  help             Show this help");
    println!("  exit, quit       Leave the console");
    println!();
    println!("{}", "Expressions:".bold());
    println!("  a symbol name, an address such as 0x1000, or NULL");
}
