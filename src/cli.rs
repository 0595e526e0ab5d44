//! Command-line interface for strictly_othello.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Othello - preview and commit Othello moves
#[derive(Parser, Debug)]
#[command(name = "strictly_othello")]
#[command(about = "Othello client with staged moves against a remote authority", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to client config (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against a TCP authority, reading commands from stdin
    Connect {
        /// Authority address (host:port), overrides the config file
        #[arg(long)]
        addr: Option<String>,

        /// Do not print the board after each change
        #[arg(long)]
        quiet: bool,
    },
}
