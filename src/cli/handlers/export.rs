//! Handler for the `export` command.

use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};

use super::{display_paths, load_dataset, print_result, report_empty, write_artifacts};
use crate::cli::ExportArgs;
use crate::cli::config::Config;
use crate::cli::output::ExportResult;
use crate::export::{export_canvases, export_cards};
use crate::index::EntityIndex;

/// Handle the `export` command.
///
/// Canvases are written to the vault root and cards under the cards path,
/// so every canvas file reference resolves inside the vault.
pub fn handle_export(args: &ExportArgs, config: &Config) -> Result<()> {
    let dataset = load_dataset(&args.input)?;
    let index = EntityIndex::build(&dataset);
    let vault_dir = config.output_dir(args.output.as_ref());
    let cards_path = config.cards_path(args.cards_path.as_deref());
    let cards_dir = cards_dir(&vault_dir, &cards_path)?;

    let cards = export_cards(&dataset, &index);
    let canvases = export_canvases(&dataset, &index, &cards_path);

    let mut written = Vec::new();
    if cards.is_empty() {
        report_empty("cards");
    } else {
        written.extend(write_artifacts(&cards_dir, &cards)?);
    }
    let cards_written = written.len();

    if canvases.is_empty() {
        report_empty("whiteboards");
    } else {
        written.extend(write_artifacts(&vault_dir, &canvases)?);
    }
    let canvases_written = written.len() - cards_written;

    print_result(
        args.format,
        ExportResult {
            cards_exported: Some(cards_written),
            canvases_exported: Some(canvases_written),
            path: vault_dir.display().to_string(),
            files: display_paths(&written),
        },
        &format!(
            "Exported {} cards and {} canvas files to {}",
            cards_written,
            canvases_written,
            vault_dir.display()
        ),
    )
}

/// Directory for card files: the cards path taken relative to the vault.
///
/// Fails when the path climbs out of the vault with `..`.
fn cards_dir(vault_dir: &Path, cards_path: &str) -> Result<PathBuf> {
    let relative = cards_path.trim_start_matches(['/', '\\']);
    if Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        bail!("cards path must stay inside the output directory: {}", cards_path);
    }
    if relative.is_empty() {
        Ok(vault_dir.to_path_buf())
    } else {
        Ok(vault_dir.join(relative))
    }
}
