//! cardport - export a card and whiteboard knowledge base to Markdown and canvas files

pub mod cli;
pub mod domain;
pub mod export;
pub mod index;
pub mod infra;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_canvas, handle_cards, handle_completions, handle_export, handle_inspect},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load()?;

    match &cli.command {
        Command::Cards(args) => handle_cards(args, &config),
        Command::Canvas(args) => handle_canvas(args, &config),
        Command::Export(args) => handle_export(args, &config),
        Command::Inspect(args) => handle_inspect(args),
        Command::Completions(args) => handle_completions(args),
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
