//! Kindred Domain Layer
//!
//! This crate contains the value types shared by every other Kindred crate and the
//! trait describing the persistence collaborator. It holds no behaviour beyond
//! construction helpers: validation lives in `kindred-graph`, positions are computed by
//! `kindred-layout` and animated by `kindred-physics`.
//!
//! ## Key Concepts
//!
//! - **Person**: a member of the family tree, with optional life dates
//! - **Relationship**: a typed link (`parent-child`, `spouse`, `sibling`) between two people
//! - **GraphSnapshot**: the whole graph as plain records, the bulk import/export unit
//! - **ChangeEvent**: what a repository reports after a successful write
//!
//! ## Architecture
//!
//! - Pure data types, no I/O
//! - Trait definitions for the persistence boundary
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod id;
pub mod person;
pub mod relationship;
pub mod snapshot;
pub mod traits;

// Re-exports for convenience
pub use id::{PersonId, RelationshipId};
pub use person::{NewPerson, Person, PersonPatch, Position};
pub use relationship::{Relationship, RelationshipKind, RelationshipMetadata};
pub use snapshot::{ChangeEvent, GraphSnapshot};

/// Current timestamp in milliseconds since Unix epoch
pub fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
