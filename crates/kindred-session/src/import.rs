//! Importing a snapshot under fresh ids

use kindred_domain::{GraphSnapshot, PersonId, RelationshipId};
use kindred_graph::{rules, FamilyGraph, GraphConfig, GraphError, RecordRef};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Why an imported record was left out
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportIssue {
    /// The relationship names a person missing from the import (or rejected by it)
    #[error("references a person that was not imported: {0}")]
    UnknownPerson(PersonId),

    /// The record breaks a graph invariant
    #[error(transparent)]
    Rejected(#[from] GraphError),
}

/// One skipped record, named by its id in the imported file
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSkip {
    /// The record as it appeared in the snapshot
    pub record: RecordRef,

    /// Why it was skipped
    pub issue: ImportIssue,
}

/// What an import accepted and what it left out
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// People accepted
    pub people_imported: usize,

    /// Relationships accepted
    pub relationships_imported: usize,

    /// Records left out, people first
    pub skipped: Vec<ImportSkip>,

    /// New id of every accepted person, keyed by their id in the snapshot
    pub id_map: HashMap<PersonId, PersonId>,
}

impl ImportReport {
    /// Whether every record was accepted
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// One-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} people, {} relationships imported, {} skipped",
            self.people_imported,
            self.relationships_imported,
            self.skipped.len()
        )
    }
}

/// Build a graph from `snapshot`, giving every record a fresh id
///
/// People are checked first; relationships are then remapped through the old to new
/// id map and replayed through the graph's validation in snapshot order.
pub(crate) fn import(snapshot: GraphSnapshot, config: GraphConfig) -> (FamilyGraph, ImportReport) {
    let mut report = ImportReport::default();
    let mut people = Vec::with_capacity(snapshot.people.len());

    for mut person in snapshot.people {
        let old = person.id;
        let checked = if report.id_map.contains_key(&old) {
            Err(GraphError::AlreadyExists {
                entity: "person",
                id: old.to_string(),
            })
        } else {
            rules::check_person(&person).map_err(GraphError::from)
        };

        match checked {
            Ok(()) => {
                person.id = PersonId::new();
                report.id_map.insert(old, person.id);
                people.push(person);
            }
            Err(reason) => report.skipped.push(ImportSkip {
                record: RecordRef::Person(old),
                issue: reason.into(),
            }),
        }
    }

    let mut relationships = Vec::with_capacity(snapshot.relationships.len());
    let mut original: HashMap<RelationshipId, RelationshipId> = HashMap::new();
    let mut seen: HashSet<RelationshipId> = HashSet::new();

    for mut rel in snapshot.relationships {
        let old = rel.id;
        if !seen.insert(old) {
            report.skipped.push(ImportSkip {
                record: RecordRef::Relationship(old),
                issue: ImportIssue::Rejected(GraphError::AlreadyExists {
                    entity: "relationship",
                    id: old.to_string(),
                }),
            });
            continue;
        }

        let ends = (
            report.id_map.get(&rel.person_a).copied(),
            report.id_map.get(&rel.person_b).copied(),
        );
        match ends {
            (Some(a), Some(b)) => {
                rel.id = RelationshipId::new();
                rel.person_a = a;
                rel.person_b = b;
                original.insert(rel.id, old);
                relationships.push(rel);
            }
            (None, _) => report.skipped.push(ImportSkip {
                record: RecordRef::Relationship(old),
                issue: ImportIssue::UnknownPerson(rel.person_a),
            }),
            (_, None) => report.skipped.push(ImportSkip {
                record: RecordRef::Relationship(old),
                issue: ImportIssue::UnknownPerson(rel.person_b),
            }),
        }
    }

    let remapped = GraphSnapshot {
        people,
        relationships,
    };
    let (graph, restored) = FamilyGraph::restore(remapped, config);

    for skip in restored.skipped {
        let record = match skip.record {
            RecordRef::Relationship(id) => {
                RecordRef::Relationship(original.get(&id).copied().unwrap_or(id))
            }
            other => other,
        };
        report.skipped.push(ImportSkip {
            record,
            issue: skip.reason.into(),
        });
    }

    report.people_imported = graph.person_count();
    report.relationships_imported = graph.relationship_count();

    for skip in &report.skipped {
        tracing::warn!("Import skipped {:?}: {}", skip.record, skip.issue);
    }

    (graph, report)
}
