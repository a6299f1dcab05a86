//! Clap CLI definitions (spec §6 CLI surface table).

use clap::{Args, Parser, Subcommand};

/// ghmirror -- offline-first terminal client for triaging GitHub issues.
#[derive(Parser, Debug)]
#[command(
    name = "ghmirror",
    about = "Offline-first terminal client for triaging GitHub issues",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Select a configured repository (`owner/repo`), overriding the
    /// configured default.
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Override the mirror database path.
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Enable verbose/debug logging on stderr.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

/// All available subcommands. No subcommand launches the TUI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full sync against the remote, then exit.
    Sync,
    /// Run an incremental refresh against the remote, then exit.
    Refresh,
    /// Interactively (re)write the configuration file.
    Config,
    /// List configured repositories.
    Repos,
    /// List available themes.
    Themes,
}
