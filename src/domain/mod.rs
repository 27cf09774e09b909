//! Core types: dataset records, the rich-text document model and card content classification

mod content;
mod dataset;
mod document;

pub use content::CardContent;
pub use dataset::{
    Card, CardInstance, Connection, Dataset, DatasetError, Endpoint, ObjectKind, Point, Section,
    Whiteboard,
};
pub use document::{ColorVariant, Mark, Node};
