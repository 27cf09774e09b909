//! Whiteboard to canvas graph reconstruction.
//!
//! Card-instances become `file` nodes, sections become `group` nodes and
//! connections between two card-instances become edges. Edges are joined to
//! nodes by position, not by identifier: the first file node whose `(x, y)`
//! equals the instance's position wins.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::domain::{CardInstance, Point};
use crate::index::{EntityIndex, WhiteboardItems};
use crate::infra::sanitize_file_name;

/// Height reserved for the viewer's title bar above each file node.
pub const TITLE_BAR_HEIGHT: f64 = 30.0;

/// Path prefix for file nodes when none is configured.
pub const DEFAULT_CARDS_PATH: &str = "Cards/";

/// A canvas document: `{ "nodes": [...], "edges": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Canvas {
    pub nodes: Vec<CanvasNode>,
    pub edges: Vec<CanvasEdge>,
}

impl Canvas {
    /// Serializes with two-space indentation and stable field order.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Group,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanvasNode {
    pub id: String,
    #[serde(serialize_with = "whole_as_integer")]
    pub x: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub y: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub width: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub height: f64,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Writes whole coordinates as integers (`170`, not `170.0`).
fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasEdge {
    pub id: String,
    pub from_node: String,
    pub to_node: String,
    pub from_side: Side,
    pub to_side: Side,
}

/// Side of a node an edge attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Connector sides for an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub from_side: Side,
    pub to_side: Side,
}

impl Direction {
    const fn new(from_side: Side, to_side: Side) -> Self {
        Self { from_side, to_side }
    }
}

/// Infers connector sides from the positions of the two endpoints.
pub fn detect_direction(begin: Point, end: Point) -> Direction {
    let angle = (begin.y - end.y).atan2(begin.x - end.x).to_degrees();
    classify_angle(angle)
}

/// Buckets an angle in degrees into one of four side pairs.
///
/// The boundaries (±45, ±135) are open on every named range and fall through
/// to right/left.
pub fn classify_angle(angle: f64) -> Direction {
    if angle > 45.0 && angle < 135.0 {
        Direction::new(Side::Bottom, Side::Top)
    } else if angle > 135.0 || angle < -135.0 {
        Direction::new(Side::Left, Side::Right)
    } else if angle < -45.0 && angle > -135.0 {
        Direction::new(Side::Top, Side::Bottom)
    } else {
        Direction::new(Side::Right, Side::Left)
    }
}

/// Random 16-hex-digit identifiers, unique within one generator.
#[derive(Debug)]
pub struct IdGenerator {
    rng: StdRng,
    issued: HashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            issued: HashSet::new(),
        }
    }

    pub fn next_id(&mut self) -> String {
        loop {
            let mut bytes = [0u8; 8];
            self.rng.fill_bytes(&mut bytes);
            let id: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds canvas graphs for whiteboards.
pub struct CanvasBuilder<'a> {
    index: &'a EntityIndex<'a>,
    cards_path: &'a str,
}

impl<'a> CanvasBuilder<'a> {
    /// `cards_path` is prepended to every file node's path.
    pub fn new(index: &'a EntityIndex<'a>, cards_path: &'a str) -> Self {
        Self { index, cards_path }
    }

    /// Builds the graph for one whiteboard's records.
    pub fn build(&self, items: &WhiteboardItems<'_>, ids: &mut IdGenerator) -> Canvas {
        let mut files = Vec::with_capacity(items.card_instances.len());
        for instance in &items.card_instances {
            let Some(card) = self.index.card(&instance.card_id) else {
                debug!(instance = %instance.id, card = %instance.card_id, "skipping instance of unknown card");
                continue;
            };
            files.push(CanvasNode {
                id: ids.next_id(),
                x: instance.x,
                y: instance.y,
                width: instance.width,
                height: instance.height - TITLE_BAR_HEIGHT,
                kind: NodeKind::File,
                file: Some(format!(
                    "{}{}.md",
                    self.cards_path,
                    sanitize_file_name(card.title())
                )),
                label: None,
            });
        }

        let groups: Vec<CanvasNode> = items
            .sections
            .iter()
            .map(|section| CanvasNode {
                id: ids.next_id(),
                x: section.x,
                y: section.y,
                width: section.width,
                height: section.height,
                kind: NodeKind::Group,
                file: None,
                label: Some(section.title.clone()),
            })
            .collect();

        let mut edges = Vec::new();
        for connection in &items.connections {
            if !connection.links_card_instances() {
                continue;
            }
            let (begin, end) = (connection.begin(), connection.end());
            let (Some(begin), Some(end)) = (
                self.index.card_instance(begin.id),
                self.index.card_instance(end.id),
            ) else {
                debug!(connection = %connection.id, "skipping connection with unknown endpoint");
                continue;
            };
            let (Some(from), Some(to)) = (find_node(begin, &files), find_node(end, &files)) else {
                debug!(connection = %connection.id, "skipping connection without placed endpoints");
                continue;
            };

            let direction = detect_direction(begin.position(), end.position());
            edges.push(CanvasEdge {
                id: ids.next_id(),
                from_node: from.id.clone(),
                to_node: to.id.clone(),
                from_side: direction.from_side,
                to_side: direction.to_side,
            });
        }

        let mut nodes = files;
        nodes.extend(groups);
        Canvas { nodes, edges }
    }
}

/// Finds the first file node placed at the instance's exact position.
fn find_node<'n>(instance: &CardInstance, nodes: &'n [CanvasNode]) -> Option<&'n CanvasNode> {
    nodes
        .iter()
        .find(|node| node.x == instance.x && node.y == instance.y)
}
