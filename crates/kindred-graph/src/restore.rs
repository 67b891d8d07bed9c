//! Rebuilding a graph from persisted records

use crate::rules;
use crate::{FamilyGraph, GraphConfig, GraphError};
use kindred_domain::{GraphSnapshot, PersonId, RelationshipId};

/// Which stored record was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef {
    /// A person record
    Person(PersonId),

    /// A relationship record
    Relationship(RelationshipId),
}

/// A stored record that failed validation while restoring
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// The record
    pub record: RecordRef,

    /// Why it was left out
    pub reason: GraphError,
}

/// What happened while restoring a snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    /// People accepted into the graph
    pub people_restored: usize,

    /// Relationships accepted into the graph
    pub relationships_restored: usize,

    /// Records that broke an invariant
    pub skipped: Vec<SkippedRecord>,
}

impl RestoreReport {
    /// Whether every record made it in
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl FamilyGraph {
    /// Rebuild a graph from stored records
    ///
    /// Records keep their ids and timestamps. Each one is replayed through the same
    /// checks as a live mutation, in snapshot order; spouse side effects are not
    /// re-run since their results were stored too. Records that fail are left out
    /// and listed in the report rather than failing the whole restore.
    pub fn restore(snapshot: GraphSnapshot, config: GraphConfig) -> (FamilyGraph, RestoreReport) {
        let mut graph = FamilyGraph::new(config);
        let mut report = RestoreReport::default();

        for person in snapshot.people {
            let id = person.id;
            let checked = if graph.people.contains_key(&id) {
                Err(GraphError::AlreadyExists {
                    entity: "person",
                    id: id.to_string(),
                })
            } else {
                rules::check_person(&person).map_err(GraphError::from)
            };

            match checked {
                Ok(()) => {
                    graph.people.insert(id, person);
                    report.people_restored += 1;
                }
                Err(reason) => {
                    tracing::warn!("Skipping stored person {}: {}", id, reason);
                    report.skipped.push(SkippedRecord {
                        record: RecordRef::Person(id),
                        reason,
                    });
                }
            }
        }

        for rel in snapshot.relationships {
            let id = rel.id;
            let checked = if graph.relationships.contains_key(&id) {
                Err(GraphError::AlreadyExists {
                    entity: "relationship",
                    id: id.to_string(),
                })
            } else {
                graph.validate_relationship(rel.kind, rel.person_a, rel.person_b, &rel.metadata)
            };

            match checked {
                Ok(()) => {
                    graph.insert_relationship(rel);
                    report.relationships_restored += 1;
                }
                Err(reason) => {
                    tracing::warn!("Skipping stored relationship {}: {}", id, reason);
                    report.skipped.push(SkippedRecord {
                        record: RecordRef::Relationship(id),
                        reason,
                    });
                }
            }
        }

        (graph, report)
    }
}
