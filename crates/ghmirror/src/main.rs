//! `ghmirror` -- offline-first terminal client for triaging GitHub issues.
//!
//! Parses CLI arguments, resolves the runtime context, and either launches
//! the TUI or dispatches to a one-shot subcommand.

mod cli;
mod commands;
mod context;

use std::sync::Arc;

use clap::Parser;
use ghmirror_store::Store;
use ghmirror_tui::ThemeColors;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    if cli.global.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                std::env::var("GHMIRROR_LOG")
                    .or_else(|_| std::env::var("RUST_LOG"))
                    .unwrap_or_else(|_| "ghmirror=debug".to_string()),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Some(Commands::Config) => commands::config_cmd::run(),
        Some(Commands::Repos) => commands::repos::run(),
        Some(Commands::Themes) => commands::themes::run(),
        Some(Commands::Sync) => RuntimeContext::resolve(&cli.global).and_then(|ctx| commands::sync::run(&ctx)),
        Some(Commands::Refresh) => {
            RuntimeContext::resolve(&cli.global).and_then(|ctx| commands::refresh::run(&ctx))
        }
        None => launch(&cli.global),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn launch(global: &cli::GlobalArgs) -> anyhow::Result<()> {
    let ctx = RuntimeContext::resolve(global)?;
    let (store, fetcher, _token) = ctx.open()?;
    let initial_issues = store.load_issue_list()?;
    let theme = ThemeColors::for_theme(ctx.config.display.theme);
    let engine = Arc::new(ctx.engine(store, fetcher));

    ghmirror_tui::run(
        engine,
        ctx.repo.clone(),
        theme,
        initial_issues,
        ctx.config.display.columns.clone(),
        true,
    )?;
    Ok(())
}
