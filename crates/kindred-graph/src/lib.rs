//! Kindred Graph Model
//!
//! Owns the canonical family graph and guards every mutation.
//!
//! The graph model provides:
//! - Person CRUD with name and life-date validation
//! - Relationship CRUD with existence, reflexivity, duplicate, date and cycle checks
//! - Automatic parent links when two parents marry
//! - Derived queries (parents, children, spouses, siblings, ancestors, descendants)
//! - Generation indices over the parent-child DAG
//! - Restoring a graph from persisted records with a report of what was skipped
//!
//! # Examples
//!
//! ```
//! use kindred_domain::{NewPerson, RelationshipKind};
//! use kindred_graph::{FamilyGraph, GraphError, ValidationError};
//!
//! let mut graph = FamilyGraph::default();
//! let me = graph.add_person(NewPerson::named("Me")).unwrap();
//!
//! // Rejected mutations leave the graph untouched
//! let err = graph
//!     .add_relationship(RelationshipKind::Spouse, me.id, me.id, Default::default())
//!     .unwrap_err();
//! assert_eq!(err, GraphError::Validation(ValidationError::SelfRelationship));
//! assert_eq!(graph.relationship_count(), 0);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod graph;
mod queries;
mod restore;
pub mod rules;

pub use config::GraphConfig;
pub use error::{GraphError, ValidationError};
pub use graph::{FamilyGraph, RelationshipOutcome, SkippedLink};
pub use restore::{RecordRef, RestoreReport, SkippedRecord};
