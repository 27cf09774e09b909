//! Export of a dataset into Markdown cards and canvas graphs.
//!
//! The two artifact sets are independent: cards become one Markdown file
//! each, whiteboards become one `.canvas` JSON file each.

pub mod canvas;
pub mod links;
pub mod markdown;

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::domain::Dataset;
use crate::index::{EntityIndex, WhiteboardItems};
use crate::infra::sanitize_file_name;

pub use canvas::{
    Canvas, CanvasBuilder, CanvasEdge, CanvasNode, DEFAULT_CARDS_PATH, Direction, IdGenerator,
    NodeKind, Side, classify_angle, detect_direction,
};
pub use links::{LinkResolution, resolve_card_references};
pub use markdown::MarkdownConverter;

/// One named output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub content: String,
}

/// Converts every exportable card to a Markdown artifact.
///
/// Trashed and untitled cards are skipped. A card whose content cannot be
/// read is exported with empty text.
pub fn export_cards(dataset: &Dataset, index: &EntityIndex<'_>) -> Vec<Artifact> {
    let converter = MarkdownConverter::new(index);
    let artifacts: Vec<Artifact> = dataset
        .exportable_cards()
        .map(|card| Artifact {
            filename: format!("{}.md", sanitize_file_name(card.title())),
            content: converter.convert_card(card),
        })
        .collect();

    warn_on_collisions(&artifacts);
    info!(
        cards = artifacts.len(),
        skipped = dataset.cards.len() - artifacts.len(),
        "converted cards"
    );
    artifacts
}

/// Builds one canvas artifact per whiteboard.
///
/// `cards_path` is prepended to every file node's path so canvases can
/// reference the card artifacts.
pub fn export_canvases(
    dataset: &Dataset,
    index: &EntityIndex<'_>,
    cards_path: &str,
) -> Vec<Artifact> {
    let builder = CanvasBuilder::new(index, cards_path);
    let mut ids = IdGenerator::new();
    let mut artifacts = Vec::with_capacity(dataset.whiteboards.len());
    let mut seen = HashSet::new();
    let no_items = WhiteboardItems::default();

    for whiteboard in &dataset.whiteboards {
        // Only the first whiteboard with a given id owns its records.
        let items = if seen.insert(whiteboard.id.as_str()) {
            index.whiteboard_items(&whiteboard.id).unwrap_or(&no_items)
        } else {
            debug!(whiteboard = %whiteboard.id, "duplicate whiteboard id, exporting empty canvas");
            &no_items
        };
        let canvas = builder.build(items, &mut ids);
        match canvas.to_json() {
            Ok(content) => artifacts.push(Artifact {
                filename: format!("{}.canvas", whiteboard.name),
                content,
            }),
            Err(e) => {
                warn!(whiteboard = %whiteboard.id, error = %e, "failed to serialize canvas, skipping");
            }
        }
    }

    warn_on_collisions(&artifacts);
    info!(canvases = artifacts.len(), "built canvases");
    artifacts
}

fn warn_on_collisions(artifacts: &[Artifact]) {
    let mut seen = HashSet::new();
    for artifact in artifacts {
        if !seen.insert(artifact.filename.as_str()) {
            warn!(filename = %artifact.filename, "duplicate file name, later artifact replaces earlier one");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    fn sample() -> Dataset {
        Dataset::from_value(json!({
            "cardList": [
                {
                    "id": "c1",
                    "title": "Hello/World",
                    "content": {
                        "type": "doc",
                        "content": [{
                            "type": "heading",
                            "attrs": {"level": 2},
                            "content": [{"type": "text", "text": "Hi"}]
                        }]
                    },
                    "isTrashed": false
                },
                {"id": "c2", "title": "Trashed", "content": "x", "isTrashed": true},
                {"id": "c3", "title": "  ", "content": "x"},
                {"id": "c4", "title": "Broken", "content": "{not json"}
            ],
            "whiteBoardList": [
                {"id": "w1", "name": "Board"},
                {"id": "w2", "name": "Empty"}
            ],
            "cardInstances": [
                {"id": "i1", "cardId": "c1", "whiteboardId": "w1", "x": 0, "y": 0, "width": 200, "height": 100},
                {"id": "i2", "cardId": "c4", "whiteboardId": "w1", "x": 100, "y": 0, "width": 200, "height": 100}
            ],
            "connections": [{
                "id": "e1", "whiteboardId": "w1",
                "beginId": "i2", "beginObjectType": "cardInstance",
                "endId": "i1", "endObjectType": "cardInstance"
            }],
            "sections": [{"id": "s1", "whiteboardId": "w1", "title": "Area", "width": 10, "height": 10}]
        }))
        .unwrap()
    }

    #[test]
    fn exports_heading_card_with_sanitized_name() {
        let data = sample();
        let index = EntityIndex::build(&data);
        let cards = export_cards(&data, &index);

        assert_eq!(
            cards[0],
            Artifact {
                filename: "Hello÷World.md".into(),
                content: "## Hi".into()
            }
        );
    }

    #[test]
    fn skips_trashed_and_untitled_cards() {
        let data = sample();
        let index = EntityIndex::build(&data);
        let names: Vec<_> = export_cards(&data, &index)
            .into_iter()
            .map(|a| a.filename)
            .collect();

        assert_eq!(names, vec!["Hello÷World.md", "Broken.md"]);
    }

    #[test]
    fn malformed_card_exports_empty_without_aborting() {
        let data = sample();
        let index = EntityIndex::build(&data);
        let cards = export_cards(&data, &index);

        assert_eq!(cards[1].content, "");
    }

    #[test]
    fn exports_one_canvas_per_whiteboard() {
        let data = sample();
        let index = EntityIndex::build(&data);
        let canvases = export_canvases(&data, &index, DEFAULT_CARDS_PATH);

        let names: Vec<_> = canvases.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, vec!["Board.canvas", "Empty.canvas"]);

        let empty: Value = serde_json::from_str(&canvases[1].content).unwrap();
        assert_eq!(empty, json!({"nodes": [], "edges": []}));
    }

    #[test]
    fn canvas_json_links_cards_path() {
        let data = sample();
        let index = EntityIndex::build(&data);
        let canvases = export_canvases(&data, &index, "Notes/");
        let board: Value = serde_json::from_str(&canvases[0].content).unwrap();

        assert_eq!(board["nodes"][0]["file"], "Notes/Hello÷World.md");
        assert_eq!(board["nodes"][0]["height"], 70.0);
        assert_eq!(board["nodes"][2]["type"], "group");
        assert_eq!(board["nodes"][2]["label"], "Area");
        assert_eq!(board["edges"][0]["fromSide"], "right");
        assert_eq!(board["edges"][0]["toSide"], "left");
        assert_eq!(board["edges"][0]["fromNode"], board["nodes"][1]["id"]);
    }

    #[test]
    fn canvas_json_is_indented_two_spaces() {
        let data = sample();
        let index = EntityIndex::build(&data);
        let canvases = export_canvases(&data, &index, DEFAULT_CARDS_PATH);
        assert!(canvases[0].content.starts_with("{\n  \"nodes\": ["));
    }

    #[test]
    fn ids_are_unique_across_whiteboards() {
        let data = sample();
        let index = EntityIndex::build(&data);
        let canvases = export_canvases(&data, &index, DEFAULT_CARDS_PATH);

        let mut ids = HashSet::new();
        for artifact in &canvases {
            let canvas: Value = serde_json::from_str(&artifact.content).unwrap();
            for item in canvas["nodes"].as_array().unwrap().iter().chain(canvas["edges"].as_array().unwrap()) {
                assert!(ids.insert(item["id"].as_str().unwrap().to_string()));
            }
        }
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn duplicate_whiteboard_id_exports_records_once() {
        let data = Dataset::from_value(json!({
            "cardList": [{"id": "c1", "title": "Only"}],
            "whiteBoardList": [
                {"id": "w1", "name": "First"},
                {"id": "w1", "name": "Second"}
            ],
            "cardInstances": [{
                "id": "i1", "cardId": "c1", "whiteboardId": "w1",
                "x": 0, "y": 0, "width": 100, "height": 100
            }]
        }))
        .unwrap();
        let index = EntityIndex::build(&data);
        let canvases = export_canvases(&data, &index, DEFAULT_CARDS_PATH);

        let first: Value = serde_json::from_str(&canvases[0].content).unwrap();
        let second: Value = serde_json::from_str(&canvases[1].content).unwrap();
        assert_eq!(first["nodes"].as_array().unwrap().len(), 1);
        assert_eq!(second, json!({"nodes": [], "edges": []}));
    }

    #[test]
    fn unreadable_records_do_not_stop_export() {
        let data = Dataset::from_value(json!({
            "cardList": [
                {"id": "c1", "title": "Kept", "content": "body"},
                {"title": "Missing id"}
            ],
            "whiteBoardList": [{"id": "w1", "name": null}],
            "cardInstances": [
                {"id": "i1", "cardId": "c1", "whiteboardId": "w1", "x": null, "y": 0, "width": 100, "height": 100}
            ],
            "connections": [{"id": "e1", "whiteboardId": "w1", "beginId": "i1", "endId": "i1"}]
        }))
        .unwrap();
        let index = EntityIndex::build(&data);

        let cards = export_cards(&data, &index);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].filename, "Kept.md");
        assert_eq!(cards[0].content, "body");

        let canvases = export_canvases(&data, &index, DEFAULT_CARDS_PATH);
        assert_eq!(canvases[0].filename, ".canvas");
        let canvas: Value = serde_json::from_str(&canvases[0].content).unwrap();
        assert_eq!(canvas["nodes"][0]["x"], 0);
        assert!(canvas["edges"].as_array().unwrap().is_empty());
    }

    /// Removes identifier fields so two runs can be compared structurally.
    fn strip_ids(content: &str) -> Value {
        let mut canvas: Value = serde_json::from_str(content).unwrap();
        for key in ["nodes", "edges"] {
            for item in canvas[key].as_array_mut().unwrap() {
                let obj = item.as_object_mut().unwrap();
                obj.remove("id");
                obj.remove("fromNode");
                obj.remove("toNode");
            }
        }
        canvas
    }

    #[test]
    fn repeated_runs_match_except_for_ids() {
        let data = sample();
        let index = EntityIndex::build(&data);

        assert_eq!(export_cards(&data, &index), export_cards(&data, &index));

        let first = export_canvases(&data, &index, DEFAULT_CARDS_PATH);
        let second = export_canvases(&data, &index, DEFAULT_CARDS_PATH);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.filename, b.filename);
            assert_eq!(strip_ids(&a.content), strip_ids(&b.content));
        }
    }
}
