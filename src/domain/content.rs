//! Classification of a card's raw `content` field.

use serde_json::Value;

use super::document::Node;

/// What a card's `content` field turned out to hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CardContent {
    /// A rich-text document tree.
    Document(Node),
    /// Plain text from older exports, used verbatim.
    Legacy(String),
    /// Content that cannot be interpreted; the reason is for logging.
    Malformed(String),
}

impl CardContent {
    /// Classifies a raw content value.
    ///
    /// - JSON objects are documents.
    /// - Strings starting with `{` must hold a serialized document object.
    /// - Other strings are legacy text; `null` is empty legacy text.
    /// - Anything else is malformed.
    pub fn classify(value: &Value) -> CardContent {
        match value {
            Value::Object(_) => CardContent::Document(Node::from_value(value)),
            Value::Null => CardContent::Legacy(String::new()),
            Value::String(s) if s.trim_start().starts_with('{') => {
                match serde_json::from_str::<Value>(s) {
                    Ok(parsed @ Value::Object(_)) => CardContent::Document(Node::from_value(&parsed)),
                    Ok(_) => CardContent::Malformed("serialized content is not an object".into()),
                    Err(e) => CardContent::Malformed(format!("invalid serialized document: {e}")),
                }
            }
            Value::String(s) => CardContent::Legacy(s.clone()),
            Value::Bool(_) | Value::Number(_) | Value::Array(_) => {
                CardContent::Malformed(format!("unsupported content type: {}", json_type(value)))
            }
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
