// Copyright (c) 2025 pgprint Contributors
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for pgprint
//!
//! Provides one-off node printing and an interactive console over a
//! process snapshot.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_print, handle_shell, render_config};
