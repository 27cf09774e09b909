//! Builder for test datasets.

#![allow(dead_code)]

use serde_json::{Value, json};

/// Builder for dataset exports with a fluent API.
///
/// Produces the JSON shape of a real export: `cardList`, `whiteBoardList`,
/// `cardInstances`, `connections` and `sections`.
#[derive(Debug, Default)]
pub struct TestDataset {
    cards: Vec<Value>,
    whiteboards: Vec<Value>,
    instances: Vec<Value>,
    connections: Vec<Value>,
    sections: Vec<Value>,
}

impl TestDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a card whose content is a document with one paragraph.
    pub fn card(self, id: &str, title: &str, text: &str) -> Self {
        let content = json!({
            "type": "doc",
            "content": [{"type": "paragraph", "content": [{"type": "text", "text": text}]}]
        });
        self.card_with_content(id, title, content)
    }

    /// Adds a card with arbitrary content (document object or string).
    pub fn card_with_content(mut self, id: &str, title: &str, content: Value) -> Self {
        self.cards.push(json!({
            "id": id,
            "title": title,
            "content": content,
            "isTrashed": false
        }));
        self
    }

    /// Adds a trashed card.
    pub fn trashed_card(mut self, id: &str, title: &str) -> Self {
        self.cards.push(json!({
            "id": id,
            "title": title,
            "content": "",
            "isTrashed": true
        }));
        self
    }

    pub fn whiteboard(mut self, id: &str, name: &str) -> Self {
        self.whiteboards.push(json!({"id": id, "name": name}));
        self
    }

    /// Places a card on a whiteboard with a 300x200 footprint.
    pub fn instance(mut self, id: &str, card: &str, whiteboard: &str, x: f64, y: f64) -> Self {
        self.instances.push(json!({
            "id": id,
            "cardId": card,
            "whiteboardId": whiteboard,
            "x": x,
            "y": y,
            "width": 300,
            "height": 200
        }));
        self
    }

    /// Connects two card-instances.
    pub fn connection(mut self, id: &str, whiteboard: &str, begin: &str, end: &str) -> Self {
        self.connections.push(json!({
            "id": id,
            "whiteboardId": whiteboard,
            "beginId": begin,
            "beginObjectType": "cardInstance",
            "endId": end,
            "endObjectType": "cardInstance"
        }));
        self
    }

    pub fn section(mut self, id: &str, whiteboard: &str, title: &str) -> Self {
        self.sections.push(json!({
            "id": id,
            "whiteboardId": whiteboard,
            "x": -50,
            "y": -50,
            "width": 800,
            "height": 600,
            "title": title
        }));
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "cardList": self.cards,
            "whiteBoardList": self.whiteboards,
            "cardInstances": self.instances,
            "connections": self.connections,
            "sections": self.sections
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_value()).expect("dataset serializes")
    }
}
