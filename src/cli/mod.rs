//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// cardport - export a card and whiteboard knowledge base to Markdown and canvas files
#[derive(Parser, Debug)]
#[command(name = "cardport", version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert every card to a Markdown file
    Cards(CardsArgs),

    /// Convert every whiteboard to a canvas file
    Canvas(CanvasArgs),

    /// Write cards and canvases into one vault directory
    Export(ExportArgs),

    /// Validate a dataset and show what it contains
    Inspect(InspectArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `cards` command
#[derive(Parser, Debug)]
pub struct CardsArgs {
    /// Dataset export (.json)
    pub input: PathBuf,

    /// Output directory (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `canvas` command
#[derive(Parser, Debug)]
pub struct CanvasArgs {
    /// Dataset export (.json)
    pub input: PathBuf,

    /// Output directory (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path prefix for card files referenced by canvas nodes
    #[arg(long)]
    pub cards_path: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Dataset export (.json)
    pub input: PathBuf,

    /// Vault directory; canvases land here, cards under the cards path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path prefix for card files, relative to the vault directory
    #[arg(long)]
    pub cards_path: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `inspect` command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Dataset export (.json)
    pub input: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
