//! Identifier lookups over a loaded dataset

mod entity;

pub use entity::{EntityIndex, WhiteboardItems};
