//! Rich-text document to Markdown conversion.
//!
//! Conversion is a recursive walk over [`Node`]. It is total: unknown kinds
//! render their children back to back, and no input makes it fail.

use tracing::{debug, warn};

use crate::domain::{Card, CardContent, ColorVariant, Mark, Node};
use crate::index::EntityIndex;

use super::links::{resolve_card_references, wiki_link};

const BLOCK_SEPARATOR: &str = "\n\n";
const LIST_INDENT: &str = "  ";
const PDF_FALLBACK_TITLE: &str = "PDF Document";
const EMBED_PLACEHOLDER: &str = "[Embedded content]";

/// Converts documents to Markdown, resolving references through an index.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownConverter<'a> {
    index: &'a EntityIndex<'a>,
}

impl<'a> MarkdownConverter<'a> {
    pub fn new(index: &'a EntityIndex<'a>) -> Self {
        Self { index }
    }

    /// Renders a card's content, including the legacy reference pass.
    ///
    /// Malformed content degrades to empty text.
    pub fn convert_card(&self, card: &Card) -> String {
        let text = match CardContent::classify(&card.content) {
            CardContent::Document(doc) => self.convert(&doc),
            CardContent::Legacy(text) => text,
            CardContent::Malformed(reason) => {
                warn!(card = %card.id, title = card.title(), %reason, "unreadable card content, exporting empty text");
                String::new()
            }
        };

        let resolution = resolve_card_references(&text, self.index);
        if resolution.unresolved > 0 {
            debug!(
                card = %card.id,
                unresolved = resolution.unresolved,
                "left legacy card references unresolved"
            );
        }
        resolution.content
    }

    /// Renders one document tree.
    pub fn convert(&self, node: &Node) -> String {
        self.render_block(node)
    }

    fn render_block(&self, node: &Node) -> String {
        match node {
            Node::Doc(blocks) | Node::Section(blocks) => self.render_blocks(blocks),
            Node::Heading { level, content } => {
                format!("{} {}", "#".repeat(*level), self.render_inline(content))
            }
            Node::Paragraph(content) | Node::ListItem(content) | Node::TableCell(content) => {
                self.render_inline(content)
            }
            Node::BulletList(items) => items
                .iter()
                .map(|item| self.render_list_entry(item, "- "))
                .collect::<Vec<_>>()
                .join("\n"),
            Node::OrderedList { start, items } => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let number = start.saturating_add(i as u64);
                    self.render_list_entry(item, &format!("{}. ", number))
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Node::BulletListItem(content) | Node::ToggleListItem(content) => {
                self.render_list_item(content, "- ")
            }
            Node::OrderedListItem(content) => self.render_list_item(content, "1. "),
            Node::TodoListItem { checked, content } => {
                self.render_list_item(content, todo_marker(*checked))
            }
            Node::CodeBlock { language, content } => {
                let body: String = content.iter().map(Node::plain_text).collect();
                format!("```{}\n{}\n```", language, body)
            }
            Node::Blockquote(blocks) => prefix_lines(&self.render_blocks(blocks), "> "),
            Node::HorizontalRule => "---".to_string(),
            Node::HardBreak => "  \n".to_string(),
            Node::Image { src, alt, title } => match title {
                Some(title) => format!("![{}]({} \"{}\")", alt, src, title),
                None => format!("![{}]({})", alt, src),
            },
            Node::MathDisplay(source) => format!("$${}$$", source),
            Node::MathInline(source) => format!("${}$", source),
            Node::Table(rows) => self.render_table(rows),
            Node::TableRow(cells) => {
                let cells: Vec<String> = cells.iter().map(|c| self.render_block(c)).collect();
                format!("| {} |", cells.join(" | "))
            }
            Node::CardRef { card_id } => card_id
                .as_deref()
                .and_then(|id| self.index.card(id))
                .map(|card| wiki_link(card.title()))
                .unwrap_or_default(),
            Node::WhiteboardRef { whiteboard_id } => whiteboard_id
                .as_deref()
                .and_then(|id| self.index.whiteboard(id))
                .map(|board| wiki_link(&format!("{}.canvas", board.name)))
                .unwrap_or_default(),
            Node::PdfRef { title } => {
                format!("[{}]", title.as_deref().unwrap_or(PDF_FALLBACK_TITLE))
            }
            Node::Embed { src } => match src {
                Some(src) => format!("[{}]({})", src, src),
                None => EMBED_PLACEHOLDER.to_string(),
            },
            Node::Text { text, marks } => apply_marks(text, marks),
            Node::Unknown { content, .. } => {
                content.iter().map(|child| self.render_block(child)).collect()
            }
        }
    }

    fn render_blocks(&self, blocks: &[Node]) -> String {
        blocks
            .iter()
            .map(|b| self.render_block(b))
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }

    /// Renders a run of inline nodes; non-text nodes go through block dispatch.
    fn render_inline(&self, nodes: &[Node]) -> String {
        nodes
            .iter()
            .map(|node| match node {
                Node::Text { text, marks } => apply_marks(text, marks),
                other => self.render_block(other),
            })
            .collect()
    }

    /// Renders one child of a list node with the list's marker.
    fn render_list_entry(&self, item: &Node, marker: &str) -> String {
        match item {
            Node::TodoListItem { checked, content } => {
                self.render_list_item(content, todo_marker(*checked))
            }
            Node::ListItem(content)
            | Node::BulletListItem(content)
            | Node::OrderedListItem(content)
            | Node::ToggleListItem(content) => self.render_list_item(content, marker),
            other => self.render_list_item(std::slice::from_ref(other), marker),
        }
    }

    /// The first paragraph supplies the item line; every other child is
    /// rendered as a block indented under it.
    fn render_list_item(&self, content: &[Node], marker: &str) -> String {
        let lead = content.iter().position(|n| matches!(n, Node::Paragraph(_)));

        let mut out = String::from(marker);
        if let Some(i) = lead {
            out.push_str(&self.render_inline(content[i].children()));
        }

        for (i, child) in content.iter().enumerate() {
            if Some(i) == lead {
                continue;
            }
            let rendered = self.render_block(child);
            if rendered.is_empty() {
                continue;
            }
            out.push('\n');
            out.push_str(&indent_lines(&rendered, LIST_INDENT));
        }
        out
    }

    fn render_table(&self, rows: &[Node]) -> String {
        let mut lines = Vec::with_capacity(rows.len() + 1);
        for (i, row) in rows.iter().enumerate() {
            lines.push(self.render_block(row));
            if i == 0 {
                let columns = row.children().len().max(1);
                lines.push(format!("| {} |", vec!["---"; columns].join(" | ")));
            }
        }
        lines.join("\n")
    }
}

/// Applies marks in order; each later mark wraps the result of the earlier ones.
fn apply_marks(text: &str, marks: &[Mark]) -> String {
    marks
        .iter()
        .fold(text.to_string(), |acc, mark| apply_mark(acc, mark))
}

fn apply_mark(text: String, mark: &Mark) -> String {
    match mark {
        Mark::Bold => format!("**{}**", text),
        Mark::Italic => format!("*{}*", text),
        Mark::Code => format!("`{}`", text),
        Mark::Strike => format!("~~{}~~", text),
        Mark::Link { href } => format!("[{}]({})", text, href),
        Mark::Underline => format!("<u>{}</u>", text),
        Mark::Color {
            variant: ColorVariant::Background,
            color,
        } => format!("<mark style=\"background-color: {}\">{}</mark>", color, text),
        Mark::Color {
            variant: ColorVariant::Foreground,
            color,
        } => format!("<span style=\"color: {}\">{}</span>", color, text),
        Mark::Highlight => format!("=={}==", text),
        Mark::Date | Mark::Unknown(_) => text,
    }
}

fn todo_marker(checked: bool) -> &'static str {
    if checked { "- [x] " } else { "- [ ] " }
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Indents non-empty lines; blank lines stay blank.
fn indent_lines(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
