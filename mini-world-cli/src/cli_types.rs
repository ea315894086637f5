//! CLI type definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "mini-world")]
#[command(
    about = "Interactive console for the mini-world intruders vs. foodimals database",
    long_about = None
)]
pub(crate) struct Cli {
    /// SQLite database file to open (prompted for when omitted)
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Load the schema catalog from this YAML file instead of the built-in one
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Hide success and progress lines (menus, prompts, and tables still print)
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long)]
    pub logfile: Option<PathBuf>,
}
