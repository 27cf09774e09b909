//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Written file paths, one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Result of writing artifacts.
#[derive(Debug, Default, Serialize)]
pub struct ExportResult {
    /// Number of Markdown card files written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards_exported: Option<usize>,
    /// Number of canvas files written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvases_exported: Option<usize>,
    /// Output directory
    pub path: String,
    /// Every file written, in write order
    pub files: Vec<String>,
}

/// Dataset summary for the `inspect` command.
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub cards: usize,
    pub exportable_cards: usize,
    pub trashed_cards: usize,
    pub whiteboards: usize,
    pub card_instances: usize,
    pub connections: usize,
    pub sections: usize,
}
