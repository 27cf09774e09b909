//! Rich-text document model.
//!
//! A card's content is a tree of tagged nodes. Construction from JSON is
//! total: anything that is not a recognised node becomes `Node::Unknown`,
//! which keeps its children so no text is lost.

use serde_json::{Map, Value};

/// A node of the rich-text document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Doc(Vec<Node>),
    Heading { level: usize, content: Vec<Node> },
    Paragraph(Vec<Node>),
    ListItem(Vec<Node>),
    TableCell(Vec<Node>),
    BulletList(Vec<Node>),
    OrderedList { start: u64, items: Vec<Node> },
    BulletListItem(Vec<Node>),
    OrderedListItem(Vec<Node>),
    ToggleListItem(Vec<Node>),
    TodoListItem { checked: bool, content: Vec<Node> },
    CodeBlock { language: String, content: Vec<Node> },
    Blockquote(Vec<Node>),
    HorizontalRule,
    HardBreak,
    Image {
        src: String,
        alt: String,
        title: Option<String>,
    },
    MathDisplay(String),
    MathInline(String),
    Table(Vec<Node>),
    TableRow(Vec<Node>),
    CardRef { card_id: Option<String> },
    WhiteboardRef { whiteboard_id: Option<String> },
    PdfRef { title: Option<String> },
    Embed { src: Option<String> },
    Section(Vec<Node>),
    Text { text: String, marks: Vec<Mark> },
    Unknown { kind: String, content: Vec<Node> },
}

/// Inline formatting applied to a text node.
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Bold,
    Italic,
    Code,
    Strike,
    Link { href: String },
    Underline,
    Color { variant: ColorVariant, color: String },
    Highlight,
    Date,
    Unknown(String),
}

/// Which layer a color mark paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorVariant {
    Background,
    Foreground,
}

type Attrs = Map<String, Value>;

/// Deepest heading Markdown supports; larger levels are capped.
const MAX_HEADING_LEVEL: u64 = 6;

static NO_ATTRS: std::sync::LazyLock<Attrs> = std::sync::LazyLock::new(Map::new);

impl Node {
    /// Builds a node tree from its JSON form.
    ///
    /// Never fails: non-object values become an empty `Unknown` node.
    pub fn from_value(value: &Value) -> Node {
        let Some(obj) = value.as_object() else {
            return Node::Unknown {
                kind: String::new(),
                content: Vec::new(),
            };
        };

        let kind = obj.get("type").and_then(Value::as_str).unwrap_or("");
        let attrs = obj
            .get("attrs")
            .and_then(Value::as_object)
            .unwrap_or(&*NO_ATTRS);
        let content = children_of(obj);

        match kind {
            "doc" => Node::Doc(content),
            "heading" => Node::Heading {
                level: attr_u64(attrs, "level")
                    .map(|l| l.clamp(1, MAX_HEADING_LEVEL) as usize)
                    .unwrap_or(1),
                content,
            },
            "paragraph" => Node::Paragraph(content),
            "list_item" => Node::ListItem(content),
            "table_cell" | "table_header" => Node::TableCell(content),
            "bullet_list" => Node::BulletList(content),
            "ordered_list" => Node::OrderedList {
                start: attr_u64(attrs, "start")
                    .or_else(|| attr_u64(attrs, "order"))
                    .unwrap_or(1),
                items: content,
            },
            "bullet_list_item" => Node::BulletListItem(content),
            "ordered_list_item" => Node::OrderedListItem(content),
            "toggle_list_item" => Node::ToggleListItem(content),
            "todo_list_item" => Node::TodoListItem {
                checked: attrs
                    .get("checked")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                content,
            },
            "code_block" => Node::CodeBlock {
                language: attr_str(attrs, "params")
                    .or_else(|| attr_str(attrs, "language"))
                    .unwrap_or("")
                    .to_string(),
                content,
            },
            "blockquote" => Node::Blockquote(content),
            "horizontal_rule" => Node::HorizontalRule,
            "hard_break" => Node::HardBreak,
            "image" => Node::Image {
                src: attr_str(attrs, "src").unwrap_or("").to_string(),
                alt: attr_str(attrs, "alt").unwrap_or("").to_string(),
                title: attr_str(attrs, "title").map(str::to_string),
            },
            "math_display" => Node::MathDisplay(math_source(attrs, &content)),
            "math_inline" => Node::MathInline(math_source(attrs, &content)),
            "table" => Node::Table(content),
            "table_row" => Node::TableRow(content),
            "card" => Node::CardRef {
                card_id: attr_str(attrs, "cardId").map(str::to_string),
            },
            "whiteboard" => Node::WhiteboardRef {
                whiteboard_id: attr_str(attrs, "whiteboardId").map(str::to_string),
            },
            "pdf" | "pdf_card" => Node::PdfRef {
                title: attr_str(attrs, "title").map(str::to_string),
            },
            "embed" => Node::Embed {
                src: attr_str(attrs, "src")
                    .or_else(|| attr_str(attrs, "url"))
                    .map(str::to_string),
            },
            "section" => Node::Section(content),
            "text" => Node::Text {
                text: obj
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string(),
                marks: obj
                    .get("marks")
                    .and_then(Value::as_array)
                    .map(|marks| marks.iter().map(Mark::from_value).collect())
                    .unwrap_or_default(),
            },
            other => Node::Unknown {
                kind: other.to_string(),
                content,
            },
        }
    }

    /// Child nodes of container kinds; empty for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Doc(c)
            | Node::Paragraph(c)
            | Node::ListItem(c)
            | Node::TableCell(c)
            | Node::BulletList(c)
            | Node::BulletListItem(c)
            | Node::OrderedListItem(c)
            | Node::ToggleListItem(c)
            | Node::Blockquote(c)
            | Node::Table(c)
            | Node::TableRow(c)
            | Node::Section(c) => c.as_slice(),
            Node::Heading { content, .. }
            | Node::TodoListItem { content, .. }
            | Node::CodeBlock { content, .. }
            | Node::Unknown { content, .. } => content.as_slice(),
            Node::OrderedList { items, .. } => items.as_slice(),
            Node::HorizontalRule
            | Node::HardBreak
            | Node::Image { .. }
            | Node::MathDisplay(_)
            | Node::MathInline(_)
            | Node::CardRef { .. }
            | Node::WhiteboardRef { .. }
            | Node::PdfRef { .. }
            | Node::Embed { .. }
            | Node::Text { .. } => &[],
        }
    }

    /// Concatenated raw text of this subtree, marks ignored.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Text { text, .. } => text.clone(),
            Node::HardBreak => "\n".to_string(),
            other => other.children().iter().map(Node::plain_text).collect(),
        }
    }
}

impl Mark {
    /// Builds a mark from its JSON form. Unrecognised kinds become `Mark::Unknown`.
    pub fn from_value(value: &Value) -> Mark {
        let kind = value.get("type").and_then(Value::as_str).unwrap_or("");
        let attrs = value
            .get("attrs")
            .and_then(Value::as_object)
            .unwrap_or(&*NO_ATTRS);

        match kind {
            "bold" | "strong" => Mark::Bold,
            "italic" | "em" => Mark::Italic,
            "code" => Mark::Code,
            "strike" | "strikethrough" => Mark::Strike,
            "link" => Mark::Link {
                href: attr_str(attrs, "href").unwrap_or("").to_string(),
            },
            "underline" => Mark::Underline,
            "color" => Mark::Color {
                variant: match attr_str(attrs, "type") {
                    Some("background") => ColorVariant::Background,
                    _ => ColorVariant::Foreground,
                },
                color: attr_str(attrs, "color").unwrap_or("").to_string(),
            },
            "highlight" => Mark::Highlight,
            "date" => Mark::Date,
            other => Mark::Unknown(other.to_string()),
        }
    }
}

fn children_of(obj: &Map<String, Value>) -> Vec<Node> {
    obj.get("content")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(Node::from_value).collect())
        .unwrap_or_default()
}

fn attr_str<'a>(attrs: &'a Attrs, key: &str) -> Option<&'a str> {
    attrs.get(key).and_then(Value::as_str)
}

/// Reads an integer attribute that may be encoded as a number or a string.
fn attr_u64(attrs: &Attrs, key: &str) -> Option<u64> {
    match attrs.get(key)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn math_source(attrs: &Attrs, content: &[Node]) -> String {
    let text: String = content.iter().map(Node::plain_text).collect();
    if text.is_empty() {
        attr_str(attrs, "content")
            .or_else(|| attr_str(attrs, "latex"))
            .unwrap_or("")
            .to_string()
    } else {
        text
    }
}
