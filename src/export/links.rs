//! Legacy card reference substitution.
//!
//! Older exports embed references as the literal text `{{card <uuid>}}`.
//! These are rewritten to wiki links after document conversion.

use std::cell::Cell;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::index::EntityIndex;

static CARD_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{card\s([a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12})\}\}")
        .expect("card reference pattern is valid")
});

/// Result of resolving legacy references in converted text.
#[derive(Debug)]
pub struct LinkResolution {
    /// The text with resolved references.
    pub content: String,
    /// Number of references replaced by a wiki link.
    pub resolved: usize,
    /// Number of references left as literal text.
    pub unresolved: usize,
}

/// Replaces every `{{card <uuid>}}` whose card resolves with `[[title]]`.
///
/// Unresolved references are left untouched.
pub fn resolve_card_references(content: &str, index: &EntityIndex<'_>) -> LinkResolution {
    let resolved = Cell::new(0usize);
    let unresolved = Cell::new(0usize);

    let result = CARD_REF_RE.replace_all(content, |caps: &Captures| match index.card(&caps[1]) {
        Some(card) => {
            resolved.set(resolved.get() + 1);
            wiki_link(card.title())
        }
        None => {
            unresolved.set(unresolved.get() + 1);
            caps[0].to_string()
        }
    });

    LinkResolution {
        content: result.into_owned(),
        resolved: resolved.get(),
        unresolved: unresolved.get(),
    }
}

/// Formats a double-bracket wiki link.
pub fn wiki_link(target: &str) -> String {
    format!("[[{}]]", target)
}
