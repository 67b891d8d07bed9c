//! Whole-graph snapshots and repository change events

use crate::{Person, PersonId, Relationship, RelationshipId};
use serde::{Deserialize, Serialize};

/// The whole graph as plain records
///
/// This is the unit of bulk export/import on the persistence boundary. A snapshot is
/// not validated on its own; loading one goes through the graph model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// Every person
    #[serde(default)]
    pub people: Vec<Person>,

    /// Every relationship
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl GraphSnapshot {
    /// Whether the snapshot holds no records at all
    pub fn is_empty(&self) -> bool {
        self.people.is_empty() && self.relationships.is_empty()
    }
}

/// A successful write reported by a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A new person was stored
    PersonSaved(PersonId),

    /// An existing person was overwritten
    PersonUpdated(PersonId),

    /// A person was removed
    PersonDeleted(PersonId),

    /// A new relationship was stored
    RelationshipSaved(RelationshipId),

    /// An existing relationship was overwritten
    RelationshipUpdated(RelationshipId),

    /// A relationship was removed
    RelationshipDeleted(RelationshipId),

    /// The whole content was replaced by an import
    Imported {
        /// Number of people imported
        people: usize,
        /// Number of relationships imported
        relationships: usize,
    },
}
