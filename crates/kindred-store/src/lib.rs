//! Kindred Storage Layer
//!
//! Implements the `FamilyRepository` trait in memory.
//!
//! # Architecture
//!
//! - Insertion-ordered maps for people and relationships
//! - A broadcast channel announcing every successful write
//! - No validation: the graph model has already checked what it hands over
//!
//! # Examples
//!
//! ```
//! use kindred_domain::traits::FamilyRepository;
//! use kindred_domain::{ChangeEvent, NewPerson, Person};
//! use kindred_store::MemoryStore;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut store = MemoryStore::new();
//! let mut events = store.subscribe();
//!
//! let person = Person::from_new(NewPerson::named("Ada"), 0);
//! store.save_person(&person).await.unwrap();
//!
//! assert_eq!(events.recv().await.unwrap(), ChangeEvent::PersonSaved(person.id));
//! # });
//! ```

#![warn(missing_docs)]

use indexmap::IndexMap;
use kindred_domain::traits::FamilyRepository;
use kindred_domain::{ChangeEvent, GraphSnapshot, Person, PersonId, Relationship, RelationshipId};
use thiserror::Error;
use tokio::sync::broadcast;

/// Default number of buffered change events per subscriber
const EVENT_CAPACITY: usize = 256;

/// Errors that can occur during storage operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Update or delete of a record that is not stored
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record
        entity: &'static str,
        /// Id that was looked up
        id: String,
    },

    /// Save of a record whose id is already stored
    #[error("{entity} already stored: {id}")]
    Duplicate {
        /// Kind of record
        entity: &'static str,
        /// Conflicting id
        id: String,
    },
}

impl StoreError {
    fn missing(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    fn duplicate(entity: &'static str, id: impl ToString) -> Self {
        StoreError::Duplicate {
            entity,
            id: id.to_string(),
        }
    }
}

/// In-memory implementation of `FamilyRepository`
///
/// Records come back in the order they were first saved. Every successful write is
/// announced on a broadcast channel; having no subscriber, or a subscriber that
/// falls behind, never fails a write.
#[derive(Debug)]
pub struct MemoryStore {
    people: IndexMap<PersonId, Person>,
    relationships: IndexMap<RelationshipId, Relationship>,
    events: broadcast::Sender<ChangeEvent>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_capacity(EVENT_CAPACITY)
    }

    /// Create an empty store buffering up to `capacity` events per subscriber
    pub fn with_capacity(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            people: IndexMap::new(),
            relationships: IndexMap::new(),
            events,
        }
    }

    /// Create a store already holding a snapshot
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        let mut store = Self::new();
        store.replace(snapshot);
        store
    }

    /// Receive change events for every write from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.events.subscribe()
    }

    /// Number of stored people
    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    /// Number of stored relationships
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    fn notify(&self, event: ChangeEvent) {
        // An error only means nobody is listening
        if self.events.send(event).is_err() {
            tracing::trace!("No subscribers for {:?}", event);
        }
    }

    fn replace(&mut self, snapshot: GraphSnapshot) {
        self.people = snapshot.people.into_iter().map(|p| (p.id, p)).collect();
        self.relationships = snapshot
            .relationships
            .into_iter()
            .map(|r| (r.id, r))
            .collect();
    }
}

impl FamilyRepository for MemoryStore {
    type Error = StoreError;

    async fn get_person(&self, id: PersonId) -> Result<Option<Person>, Self::Error> {
        Ok(self.people.get(&id).cloned())
    }

    async fn list_people(&self) -> Result<Vec<Person>, Self::Error> {
        Ok(self.people.values().cloned().collect())
    }

    async fn save_person(&mut self, person: &Person) -> Result<(), Self::Error> {
        if self.people.contains_key(&person.id) {
            return Err(StoreError::duplicate("person", person.id));
        }
        self.people.insert(person.id, person.clone());
        self.notify(ChangeEvent::PersonSaved(person.id));
        Ok(())
    }

    async fn update_person(&mut self, person: &Person) -> Result<(), Self::Error> {
        let stored = self
            .people
            .get_mut(&person.id)
            .ok_or_else(|| StoreError::missing("person", person.id))?;
        *stored = person.clone();
        self.notify(ChangeEvent::PersonUpdated(person.id));
        Ok(())
    }

    async fn delete_person(&mut self, id: PersonId) -> Result<(), Self::Error> {
        self.people
            .shift_remove(&id)
            .ok_or_else(|| StoreError::missing("person", id))?;
        self.notify(ChangeEvent::PersonDeleted(id));
        Ok(())
    }

    async fn get_relationship(
        &self,
        id: RelationshipId,
    ) -> Result<Option<Relationship>, Self::Error> {
        Ok(self.relationships.get(&id).cloned())
    }

    async fn list_relationships(&self) -> Result<Vec<Relationship>, Self::Error> {
        Ok(self.relationships.values().cloned().collect())
    }

    async fn save_relationship(&mut self, relationship: &Relationship) -> Result<(), Self::Error> {
        if self.relationships.contains_key(&relationship.id) {
            return Err(StoreError::duplicate("relationship", relationship.id));
        }
        self.relationships
            .insert(relationship.id, relationship.clone());
        self.notify(ChangeEvent::RelationshipSaved(relationship.id));
        Ok(())
    }

    async fn update_relationship(
        &mut self,
        relationship: &Relationship,
    ) -> Result<(), Self::Error> {
        let stored = self
            .relationships
            .get_mut(&relationship.id)
            .ok_or_else(|| StoreError::missing("relationship", relationship.id))?;
        *stored = relationship.clone();
        self.notify(ChangeEvent::RelationshipUpdated(relationship.id));
        Ok(())
    }

    async fn delete_relationship(&mut self, id: RelationshipId) -> Result<(), Self::Error> {
        self.relationships
            .shift_remove(&id)
            .ok_or_else(|| StoreError::missing("relationship", id))?;
        self.notify(ChangeEvent::RelationshipDeleted(id));
        Ok(())
    }

    async fn export_all(&self) -> Result<GraphSnapshot, Self::Error> {
        Ok(GraphSnapshot {
            people: self.people.values().cloned().collect(),
            relationships: self.relationships.values().cloned().collect(),
        })
    }

    async fn import_all(&mut self, snapshot: GraphSnapshot) -> Result<(), Self::Error> {
        let people = snapshot.people.len();
        let relationships = snapshot.relationships.len();
        self.replace(snapshot);
        tracing::debug!(
            "Store replaced with {} people and {} relationships",
            people,
            relationships
        );
        self.notify(ChangeEvent::Imported {
            people,
            relationships,
        });
        Ok(())
    }
}
