//! In-memory lookup tables over a loaded dataset.

use std::collections::HashMap;

use crate::domain::{Card, CardInstance, Connection, Dataset, Section, Whiteboard};

/// Records owned by one whiteboard, in dataset order.
#[derive(Debug, Default, Clone)]
pub struct WhiteboardItems<'a> {
    pub card_instances: Vec<&'a CardInstance>,
    pub connections: Vec<&'a Connection>,
    pub sections: Vec<&'a Section>,
}

/// Identifier lookups over a [`Dataset`], built once per export run.
///
/// Duplicate identifiers resolve to the first record in dataset order.
/// Lookups return `None` for unknown identifiers so callers can skip.
#[derive(Debug)]
pub struct EntityIndex<'a> {
    cards: HashMap<&'a str, &'a Card>,
    whiteboards: HashMap<&'a str, &'a Whiteboard>,
    card_instances: HashMap<&'a str, &'a CardInstance>,
    items: HashMap<&'a str, WhiteboardItems<'a>>,
}

impl<'a> EntityIndex<'a> {
    /// Builds the index for a dataset.
    pub fn build(dataset: &'a Dataset) -> Self {
        let cards = first_by_id(dataset.cards.iter().map(|c| (c.id.as_str(), c)));
        let whiteboards = first_by_id(dataset.whiteboards.iter().map(|w| (w.id.as_str(), w)));
        let card_instances =
            first_by_id(dataset.card_instances.iter().map(|i| (i.id.as_str(), i)));

        let mut items: HashMap<&'a str, WhiteboardItems<'a>> = whiteboards
            .keys()
            .map(|id| (*id, WhiteboardItems::default()))
            .collect();

        // Records pointing at unknown whiteboards are dropped here.
        for instance in &dataset.card_instances {
            if let Some(group) = items.get_mut(instance.whiteboard_id.as_str()) {
                group.card_instances.push(instance);
            }
        }
        for connection in &dataset.connections {
            if let Some(group) = items.get_mut(connection.whiteboard_id.as_str()) {
                group.connections.push(connection);
            }
        }
        for section in &dataset.sections {
            if let Some(group) = items.get_mut(section.whiteboard_id.as_str()) {
                group.sections.push(section);
            }
        }

        Self {
            cards,
            whiteboards,
            card_instances,
            items,
        }
    }

    pub fn card(&self, id: &str) -> Option<&'a Card> {
        self.cards.get(id).copied()
    }

    pub fn whiteboard(&self, id: &str) -> Option<&'a Whiteboard> {
        self.whiteboards.get(id).copied()
    }

    pub fn card_instance(&self, id: &str) -> Option<&'a CardInstance> {
        self.card_instances.get(id).copied()
    }

    /// Card-instances, connections and sections owned by a whiteboard.
    ///
    /// Returns `None` only for unknown whiteboards; a known whiteboard with
    /// nothing on it yields empty lists.
    pub fn whiteboard_items(&self, whiteboard_id: &str) -> Option<&WhiteboardItems<'a>> {
        self.items.get(whiteboard_id)
    }
}

fn first_by_id<'a, T>(records: impl Iterator<Item = (&'a str, &'a T)>) -> HashMap<&'a str, &'a T> {
    let mut map = HashMap::new();
    for (id, record) in records {
        map.entry(id).or_insert(record);
    }
    map
}
