//! Trait definitions for external interactions
//!
//! The persistence layer is a collaborator, not part of the core. It is consumed
//! through this small async CRUD contract; implementations live in other crates
//! (`kindred-store` ships an in-memory one).

use crate::{GraphSnapshot, Person, PersonId, Relationship, RelationshipId};

/// Trait for storing and retrieving people and relationships
///
/// Writes are awaited by the caller after the in-memory graph has already accepted
/// the mutation. Repositories do not validate; they store what they are given.
#[allow(async_fn_in_trait)]
pub trait FamilyRepository {
    /// Error type for repository operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Get a person by ID
    async fn get_person(&self, id: PersonId) -> Result<Option<Person>, Self::Error>;

    /// List every stored person
    async fn list_people(&self) -> Result<Vec<Person>, Self::Error>;

    /// Store a new person
    async fn save_person(&mut self, person: &Person) -> Result<(), Self::Error>;

    /// Overwrite an existing person
    async fn update_person(&mut self, person: &Person) -> Result<(), Self::Error>;

    /// Remove a person
    async fn delete_person(&mut self, id: PersonId) -> Result<(), Self::Error>;

    /// Get a relationship by ID
    async fn get_relationship(&self, id: RelationshipId)
        -> Result<Option<Relationship>, Self::Error>;

    /// List every stored relationship
    async fn list_relationships(&self) -> Result<Vec<Relationship>, Self::Error>;

    /// Store a new relationship
    async fn save_relationship(&mut self, relationship: &Relationship) -> Result<(), Self::Error>;

    /// Overwrite an existing relationship
    async fn update_relationship(&mut self, relationship: &Relationship)
        -> Result<(), Self::Error>;

    /// Remove a relationship
    async fn delete_relationship(&mut self, id: RelationshipId) -> Result<(), Self::Error>;

    /// Export the whole stored graph
    async fn export_all(&self) -> Result<GraphSnapshot, Self::Error>;

    /// Replace the whole stored graph
    async fn import_all(&mut self, snapshot: GraphSnapshot) -> Result<(), Self::Error>;
}
