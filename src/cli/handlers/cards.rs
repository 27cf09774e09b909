//! Single-format command handlers (cards, canvas).

use anyhow::Result;

use super::{display_paths, load_dataset, print_result, report_empty, write_artifacts};
use crate::cli::config::Config;
use crate::cli::output::ExportResult;
use crate::cli::{CanvasArgs, CardsArgs};
use crate::export::{export_canvases, export_cards};
use crate::index::EntityIndex;

/// Handle the `cards` command.
pub fn handle_cards(args: &CardsArgs, config: &Config) -> Result<()> {
    let dataset = load_dataset(&args.input)?;
    let index = EntityIndex::build(&dataset);
    let output_dir = config.output_dir(args.output.as_ref());

    let artifacts = export_cards(&dataset, &index);
    if artifacts.is_empty() {
        report_empty("cards");
        return Ok(());
    }

    let written = write_artifacts(&output_dir, &artifacts)?;
    print_result(
        args.format,
        ExportResult {
            cards_exported: Some(written.len()),
            canvases_exported: None,
            path: output_dir.display().to_string(),
            files: display_paths(&written),
        },
        &format!(
            "Exported {} cards to {}",
            written.len(),
            output_dir.display()
        ),
    )
}

/// Handle the `canvas` command.
pub fn handle_canvas(args: &CanvasArgs, config: &Config) -> Result<()> {
    let dataset = load_dataset(&args.input)?;
    let index = EntityIndex::build(&dataset);
    let output_dir = config.output_dir(args.output.as_ref());
    let cards_path = config.cards_path(args.cards_path.as_deref());

    let artifacts = export_canvases(&dataset, &index, &cards_path);
    if artifacts.is_empty() {
        report_empty("whiteboards");
        return Ok(());
    }

    let written = write_artifacts(&output_dir, &artifacts)?;
    print_result(
        args.format,
        ExportResult {
            cards_exported: None,
            canvases_exported: Some(written.len()),
            path: output_dir.display().to_string(),
            files: display_paths(&written),
        },
        &format!(
            "Exported {} canvas files to {}",
            written.len(),
            output_dir.display()
        ),
    )
}
