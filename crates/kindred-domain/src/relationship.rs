//! Relationship module - typed, pairwise links between people

use crate::{PersonId, RelationshipId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of relationship between two people
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    /// `person_a` is a parent of `person_b` (directed)
    ParentChild,

    /// The two people are or were married (undirected)
    Spouse,

    /// The two people are siblings (undirected)
    Sibling,
}

impl RelationshipKind {
    /// Get the kind tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::ParentChild => "parent-child",
            RelationshipKind::Spouse => "spouse",
            RelationshipKind::Sibling => "sibling",
        }
    }

    /// Parse a kind tag
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "parent-child" | "parent_child" => Some(RelationshipKind::ParentChild),
            "spouse" => Some(RelationshipKind::Spouse),
            "sibling" => Some(RelationshipKind::Sibling),
            _ => None,
        }
    }

    /// Whether the order of the two people matters
    pub fn is_directed(&self) -> bool {
        matches!(self, RelationshipKind::ParentChild)
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationshipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relationship kind: {}", s))
    }
}

/// Kind-specific optional data; only meaningful for `spouse`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipMetadata {
    /// Date of marriage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<NaiveDate>,

    /// Date of divorce
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divorce_date: Option<NaiveDate>,
}

impl RelationshipMetadata {
    /// Metadata for a marriage on the given date
    pub fn married(date: NaiveDate) -> Self {
        Self {
            marriage_date: Some(date),
            divorce_date: None,
        }
    }
}

/// A pairwise relationship between two people
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Unique identifier
    pub id: RelationshipId,

    /// Type of relationship
    pub kind: RelationshipKind,

    /// First person (the parent for `parent-child`)
    pub person_a: PersonId,

    /// Second person (the child for `parent-child`)
    pub person_b: PersonId,

    /// Marriage/divorce dates
    #[serde(default)]
    pub metadata: RelationshipMetadata,

    /// When this relationship was established (ms since epoch)
    pub created_at: u64,
}

impl Relationship {
    /// Create a new relationship with a fresh id
    pub fn new(
        kind: RelationshipKind,
        person_a: PersonId,
        person_b: PersonId,
        metadata: RelationshipMetadata,
        created_at: u64,
    ) -> Self {
        Self {
            id: RelationshipId::new(),
            kind,
            person_a,
            person_b,
            metadata,
            created_at,
        }
    }

    /// Whether this relationship touches the given person
    pub fn involves(&self, id: PersonId) -> bool {
        self.person_a == id || self.person_b == id
    }

    /// The person on the other side of `id`, if `id` is part of this relationship
    pub fn other(&self, id: PersonId) -> Option<PersonId> {
        if self.person_a == id {
            Some(self.person_b)
        } else if self.person_b == id {
            Some(self.person_a)
        } else {
            None
        }
    }

    /// The two people ordered so that undirected relationships compare equal
    pub fn unordered_pair(&self) -> (PersonId, PersonId) {
        if self.person_a <= self.person_b {
            (self.person_a, self.person_b)
        } else {
            (self.person_b, self.person_a)
        }
    }
}
