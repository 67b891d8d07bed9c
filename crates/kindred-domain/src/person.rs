//! Person module - the nodes of the family graph

use crate::PersonId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A point in layout space (x right, y up, z towards the viewer)
pub type Position = nalgebra::Vector3<f64>;

/// A member of the family tree
///
/// People are created by the graph model, which assigns the id and timestamps.
/// `position` is only set when the user drags a person somewhere and keeps it there;
/// otherwise the layout engine decides where the person goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier
    pub id: PersonId,

    /// Display name (never blank)
    pub name: String,

    /// Date of birth, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,

    /// Date of death; presence means the person is deceased
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<NaiveDate>,

    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Manually committed anchor position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    /// When this person was created (ms since epoch)
    pub created_at: u64,

    /// When this person was last modified (ms since epoch)
    pub updated_at: u64,
}

impl Person {
    /// Build a person with a fresh id from caller-supplied fields
    ///
    /// No validation happens here; the graph model checks the result.
    pub fn from_new(fields: NewPerson, now: u64) -> Self {
        Self {
            id: PersonId::new(),
            name: fields.name,
            birth_date: fields.birth_date,
            death_date: fields.death_date,
            notes: fields.notes,
            position: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether a death date is recorded
    pub fn is_deceased(&self) -> bool {
        self.death_date.is_some()
    }

    /// Apply a partial update, returning the merged person
    ///
    /// Identity and creation time are never touched; the caller refreshes
    /// `updated_at` once the merged person has been accepted.
    pub fn merged(&self, patch: &PersonPatch) -> Person {
        let mut merged = self.clone();
        if let Some(name) = &patch.name {
            merged.name = name.clone();
        }
        if let Some(birth_date) = patch.birth_date {
            merged.birth_date = birth_date;
        }
        if let Some(death_date) = patch.death_date {
            merged.death_date = death_date;
        }
        if let Some(notes) = &patch.notes {
            merged.notes = notes.clone();
        }
        if let Some(position) = patch.position {
            merged.position = position;
        }
        merged
    }
}

/// The caller-supplied fields of a person about to be created
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPerson {
    /// Display name
    pub name: String,

    /// Date of birth
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,

    /// Date of death
    #[serde(default)]
    pub death_date: Option<NaiveDate>,

    /// Free-text notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewPerson {
    /// A new person with only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the birth date
    pub fn born(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    /// Set the death date
    pub fn died(mut self, date: NaiveDate) -> Self {
        self.death_date = Some(date);
        self
    }

    /// Set the notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A partial update to a person
///
/// `None` leaves a field alone. For optional fields, `Some(None)` clears the value
/// and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonPatch {
    /// New display name
    pub name: Option<String>,

    /// New birth date
    pub birth_date: Option<Option<NaiveDate>>,

    /// New death date
    pub death_date: Option<Option<NaiveDate>>,

    /// New notes
    pub notes: Option<Option<String>>,

    /// New override position
    pub position: Option<Option<Position>>,
}

impl PersonPatch {
    /// Patch that only renames
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Patch that pins the person at a position
    pub fn pin(position: Position) -> Self {
        Self {
            position: Some(Some(position)),
            ..Default::default()
        }
    }

    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.birth_date.is_none()
            && self.death_date.is_none()
            && self.notes.is_none()
            && self.position.is_none()
    }
}
