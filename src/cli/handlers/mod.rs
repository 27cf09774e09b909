//! Command handlers for the CLI.

mod cards;
mod completions;
mod export;
mod inspect;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::output::{ExportResult, Output, OutputFormat};
use crate::domain::Dataset;
use crate::export::Artifact;
use crate::infra::{read_dataset, write_artifact};

// Re-export public items
pub use cards::{handle_canvas, handle_cards};
pub use completions::handle_completions;
pub use export::handle_export;
pub use inspect::{handle_inspect, summarize};

// ===========================================
// Shared Utilities
// ===========================================

/// Loads and validates the dataset named on the command line.
pub(crate) fn load_dataset(input: &Path) -> Result<Dataset> {
    let dataset = read_dataset(input)
        .with_context(|| format!("failed to load dataset: {}", input.display()))?;
    tracing::info!(
        cards = dataset.cards.len(),
        whiteboards = dataset.whiteboards.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Writes artifacts into `dir` and returns the written paths in order.
pub(crate) fn write_artifacts(dir: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
    artifacts
        .iter()
        .map(|artifact| {
            let path = write_artifact(dir, &artifact.filename, &artifact.content)
                .with_context(|| format!("failed to write {}", artifact.filename))?;
            tracing::debug!(path = %path.display(), "wrote artifact");
            Ok(path)
        })
        .collect()
}

/// Reports an empty artifact set without failing the command.
pub(crate) fn report_empty(what: &str) {
    eprintln!("No {} to export", what);
}

/// Print the result in the requested format.
pub(crate) fn print_result(
    format: OutputFormat,
    result: ExportResult,
    human_message: &str,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            println!("{}", human_message);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(result))?);
        }
        OutputFormat::Paths => {
            for file in &result.files {
                println!("{}", file);
            }
        }
    }
    Ok(())
}

pub(crate) fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}
