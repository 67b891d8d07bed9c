//! Graph model error types
//!
//! Every message is written to be shown to the end user as-is.

use kindred_domain::RelationshipKind;
use thiserror::Error;

/// A mutation that would break a graph invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Blank or whitespace-only name
    #[error("name required")]
    NameRequired,

    /// Death date earlier than birth date
    #[error("death date cannot be before birth date")]
    DeathBeforeBirth,

    /// Parent born on or after the child
    #[error("parent must be born before child")]
    ParentNotOlder,

    /// Divorce date earlier than marriage date
    #[error("divorce date cannot be before marriage date")]
    DivorceBeforeMarriage,

    /// Both ends of the relationship are the same person
    #[error("a person cannot have a relationship with themselves")]
    SelfRelationship,

    /// Same kind of relationship already links the pair
    #[error("a {kind} relationship already exists between these people")]
    DuplicateRelationship {
        /// Kind of the existing relationship
        kind: RelationshipKind,
    },

    /// Parent-child edge that would close a loop
    #[error("this relationship would make a person their own ancestor")]
    Cycle,
}

/// Errors returned by graph mutations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An invariant was violated; nothing changed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced person or relationship does not exist
    #[error("{entity} not found: {id}")]
    NotFound {
        /// "person" or "relationship"
        entity: &'static str,
        /// The id that was looked up
        id: String,
    },

    /// A record with this id is already present
    #[error("{entity} already exists: {id}")]
    AlreadyExists {
        /// "person" or "relationship"
        entity: &'static str,
        /// The conflicting id
        id: String,
    },
}

impl GraphError {
    /// Unknown person
    pub fn person_not_found(id: impl ToString) -> Self {
        GraphError::NotFound {
            entity: "person",
            id: id.to_string(),
        }
    }

    /// Unknown relationship
    pub fn relationship_not_found(id: impl ToString) -> Self {
        GraphError::NotFound {
            entity: "relationship",
            id: id.to_string(),
        }
    }

    /// Whether this is a validation failure (as opposed to a missing record)
    pub fn is_validation(&self) -> bool {
        matches!(self, GraphError::Validation(_))
    }
}
