//! Dataset records loaded from a knowledge-base export.
//!
//! The export is a single JSON object. Only `cardList` and `whiteBoardList`
//! are required; the placement collections default to empty.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

/// Errors raised while validating a dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid dataset: missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A plane coordinate on a whiteboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single knowledge note.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Rich-text document (object or serialized string) or legacy text.
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub is_trashed: Option<bool>,
}

impl Card {
    /// Returns the title, or an empty string when the export has none.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn is_trashed(&self) -> bool {
        self.is_trashed.unwrap_or(false)
    }

    /// Trashed cards and cards without a visible title are never exported.
    pub fn is_exportable(&self) -> bool {
        !self.is_trashed() && !self.title().trim().is_empty()
    }
}

/// A named spatial canvas.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Whiteboard {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// A positioned placement of a card on a whiteboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInstance {
    pub id: String,
    pub card_id: String,
    pub whiteboard_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: f64,
}

impl CardInstance {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Kind of object a connection endpoint refers to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ObjectKind {
    CardInstance,
    Other(String),
}

impl Default for ObjectKind {
    fn default() -> Self {
        ObjectKind::Other(String::new())
    }
}

impl From<String> for ObjectKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "cardInstance" => ObjectKind::CardInstance,
            _ => ObjectKind::Other(value),
        }
    }
}

/// One side of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub kind: &'a ObjectKind,
    pub id: &'a str,
}

impl Endpoint<'_> {
    pub fn is_card_instance(&self) -> bool {
        *self.kind == ObjectKind::CardInstance
    }
}

/// A link between two whiteboard objects.
///
/// A missing or `null` endpoint type reads as an unknown kind, so the
/// connection survives loading and is skipped when graphs are built.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub whiteboard_id: String,
    pub begin_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub begin_object_type: ObjectKind,
    pub end_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub end_object_type: ObjectKind,
}

impl Connection {
    pub fn begin(&self) -> Endpoint<'_> {
        Endpoint {
            kind: &self.begin_object_type,
            id: &self.begin_id,
        }
    }

    pub fn end(&self) -> Endpoint<'_> {
        Endpoint {
            kind: &self.end_object_type,
            id: &self.end_id,
        }
    }

    /// True when both endpoints are card-instances.
    pub fn links_card_instances(&self) -> bool {
        self.begin().is_card_instance() && self.end().is_card_instance()
    }
}

/// A labelled grouping rectangle on a whiteboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub whiteboard_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

/// Reads `null` as the field type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Collections stay untyped until each record is checked on its own.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataset {
    card_list: Option<Vec<Value>>,
    white_board_list: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "null_as_default")]
    card_instances: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    connections: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    sections: Vec<Value>,
}

/// A validated, read-only snapshot of one export.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub cards: Vec<Card>,
    pub whiteboards: Vec<Whiteboard>,
    pub card_instances: Vec<CardInstance>,
    pub connections: Vec<Connection>,
    pub sections: Vec<Section>,
}

impl Dataset {
    /// Parses and validates a dataset from JSON text.
    ///
    /// Only a missing `cardList` or `whiteBoardList` is fatal. A record
    /// that cannot be read is logged and left out.
    ///
    /// # Errors
    ///
    /// Returns `DatasetError::Json` for malformed JSON and
    /// `DatasetError::MissingField` when `cardList` or `whiteBoardList` is absent.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Validates a dataset from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_value(value)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDataset) -> Result<Self, DatasetError> {
        let cards = raw.card_list.ok_or(DatasetError::MissingField("cardList"))?;
        let whiteboards = raw
            .white_board_list
            .ok_or(DatasetError::MissingField("whiteBoardList"))?;

        Ok(Self {
            cards: records("cardList", cards),
            whiteboards: records("whiteBoardList", whiteboards),
            card_instances: records("cardInstances", raw.card_instances),
            connections: records("connections", raw.connections),
            sections: records("sections", raw.sections),
        })
    }

    /// Cards that are neither trashed nor untitled.
    pub fn exportable_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_exportable())
    }
}

fn records<T: DeserializeOwned>(collection: &'static str, values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(collection, index, error = %e, "skipping unreadable record");
                None
            }
        })
        .collect()
}
