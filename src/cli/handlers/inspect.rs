//! Inspect command handler.

use anyhow::Result;

use super::load_dataset;
use crate::cli::InspectArgs;
use crate::cli::output::{DatasetSummary, Output, OutputFormat};
use crate::domain::Dataset;

pub fn handle_inspect(args: &InspectArgs) -> Result<()> {
    let dataset = load_dataset(&args.input)?;
    let summary = summarize(&dataset);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&Output::new(&summary))?);
        }
        OutputFormat::Human | OutputFormat::Paths => {
            println!(
                "Loaded {} cards and {} whiteboards",
                summary.cards, summary.whiteboards
            );
            println!("  exportable cards: {}", summary.exportable_cards);
            println!("  trashed cards:    {}", summary.trashed_cards);
            println!("  card instances:   {}", summary.card_instances);
            println!("  connections:      {}", summary.connections);
            println!("  sections:         {}", summary.sections);
        }
    }

    Ok(())
}

/// Counts the records of a dataset.
pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    DatasetSummary {
        cards: dataset.cards.len(),
        exportable_cards: dataset.exportable_cards().count(),
        trashed_cards: dataset.cards.iter().filter(|c| c.is_trashed()).count(),
        whiteboards: dataset.whiteboards.len(),
        card_instances: dataset.card_instances.len(),
        connections: dataset.connections.len(),
        sections: dataset.sections.len(),
    }
}
