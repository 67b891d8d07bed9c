//! The family graph: arena storage plus every mutation

use crate::rules;
use crate::{GraphConfig, GraphError, ValidationError};
use indexmap::IndexMap;
use kindred_domain::{
    current_timestamp, GraphSnapshot, NewPerson, Person, PersonId, PersonPatch, Relationship,
    RelationshipId, RelationshipKind, RelationshipMetadata,
};
use std::collections::HashMap;

/// Duplicate-detection key: same kind, same unordered pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PairKey {
    kind: RelationshipKind,
    low: PersonId,
    high: PersonId,
}

impl PairKey {
    pub(crate) fn new(kind: RelationshipKind, a: PersonId, b: PersonId) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self { kind, low, high }
    }
}

/// Result of adding a relationship
#[derive(Debug, Clone)]
pub struct RelationshipOutcome {
    /// The relationship that was asked for
    pub relationship: Relationship,

    /// Parent-child links created automatically (spouse side effect)
    pub auto_linked: Vec<Relationship>,

    /// Automatic links that could not be created
    pub skipped: Vec<SkippedLink>,
}

impl RelationshipOutcome {
    /// Every relationship this call added, primary first
    pub fn created(&self) -> impl Iterator<Item = &Relationship> {
        std::iter::once(&self.relationship).chain(self.auto_linked.iter())
    }
}

/// An automatic parent-child link that was rejected
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLink {
    /// Prospective parent
    pub parent: PersonId,

    /// Prospective child
    pub child: PersonId,

    /// Why it was rejected
    pub reason: GraphError,
}

/// The canonical in-memory family graph
///
/// Owns every person and relationship. Each mutation is validated in full before
/// anything is written, so a rejected call leaves the graph exactly as it was.
///
/// # Examples
///
/// ```
/// use kindred_domain::{NewPerson, RelationshipKind};
/// use kindred_graph::FamilyGraph;
///
/// let mut graph = FamilyGraph::default();
/// let mum = graph.add_person(NewPerson::named("Mum")).unwrap();
/// let kid = graph.add_person(NewPerson::named("Kid")).unwrap();
/// graph
///     .add_relationship(RelationshipKind::ParentChild, mum.id, kid.id, Default::default())
///     .unwrap();
///
/// assert_eq!(graph.children_of(mum.id), vec![kid.id]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    pub(crate) config: GraphConfig,
    pub(crate) people: IndexMap<PersonId, Person>,
    pub(crate) relationships: IndexMap<RelationshipId, Relationship>,
    pub(crate) incidence: HashMap<PersonId, Vec<RelationshipId>>,
    pub(crate) pairs: HashMap<PairKey, RelationshipId>,
}

impl FamilyGraph {
    /// Create an empty graph with the given configuration
    pub fn new(config: GraphConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The configuration in use
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    // ----- reads -----

    /// Look up a person
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    /// Look up a relationship
    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.get(&id)
    }

    /// Every person, in insertion order
    pub fn people(&self) -> impl ExactSizeIterator<Item = &Person> {
        self.people.values()
    }

    /// Every relationship, in insertion order
    pub fn relationships(&self) -> impl ExactSizeIterator<Item = &Relationship> {
        self.relationships.values()
    }

    /// Number of people
    pub fn person_count(&self) -> usize {
        self.people.len()
    }

    /// Number of relationships
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Whether the graph holds nobody
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Every relationship touching a person
    pub fn relationships_of(&self, id: PersonId) -> Vec<&Relationship> {
        self.incidence
            .get(&id)
            .map(|ids| ids.iter().filter_map(|rid| self.relationships.get(rid)).collect())
            .unwrap_or_default()
    }

    /// Find the relationship of `kind` between two people (either order)
    pub fn find_relationship(
        &self,
        kind: RelationshipKind,
        a: PersonId,
        b: PersonId,
    ) -> Option<&Relationship> {
        self.pairs
            .get(&PairKey::new(kind, a, b))
            .and_then(|id| self.relationships.get(id))
    }

    /// Copy the whole graph out as plain records
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            people: self.people.values().cloned().collect(),
            relationships: self.relationships.values().cloned().collect(),
        }
    }

    // ----- people -----

    /// Add a new person, assigning id and timestamps
    pub fn add_person(&mut self, fields: NewPerson) -> Result<Person, GraphError> {
        let now = current_timestamp();
        let person = Person::from_new(fields, now);
        rules::check_person(&person)?;

        self.people.insert(person.id, person.clone());
        Ok(person)
    }

    /// Apply a partial update to a person
    ///
    /// The merged record must satisfy the name and date rules, including birth-order
    /// against every existing parent and child.
    pub fn update_person(&mut self, id: PersonId, patch: PersonPatch) -> Result<Person, GraphError> {
        let current = self
            .people
            .get(&id)
            .ok_or_else(|| GraphError::person_not_found(id))?;

        let mut merged = current.merged(&patch);
        rules::check_person(&merged)?;
        if patch.birth_date.is_some() {
            for parent in self.parents_of(id) {
                if let Some(parent) = self.people.get(&parent) {
                    rules::check_parent_birth(parent, &merged)?;
                }
            }
            for child in self.children_of(id) {
                if let Some(child) = self.people.get(&child) {
                    rules::check_parent_birth(&merged, child)?;
                }
            }
        }

        merged.updated_at = current_timestamp().max(merged.updated_at);
        self.people.insert(id, merged.clone());
        Ok(merged)
    }

    /// Remove a person and every relationship touching them
    ///
    /// Returns the removed person and the cascaded relationships.
    pub fn delete_person(&mut self, id: PersonId) -> Result<(Person, Vec<Relationship>), GraphError> {
        if !self.people.contains_key(&id) {
            return Err(GraphError::person_not_found(id));
        }

        let touching = self.incidence.get(&id).cloned().unwrap_or_default();
        let mut removed = Vec::with_capacity(touching.len());
        for rid in touching {
            if let Some(rel) = self.remove_relationship(rid) {
                removed.push(rel);
            }
        }
        self.incidence.remove(&id);

        let person = self
            .people
            .shift_remove(&id)
            .ok_or_else(|| GraphError::person_not_found(id))?;
        Ok((person, removed))
    }

    // ----- relationships -----

    /// Add a relationship after running every structural check
    ///
    /// Checks run in order: both people exist, not reflexive, not a duplicate, date
    /// rules, and for `parent-child` no cycle. Adding a `spouse` also makes each
    /// spouse a parent of the other's existing children (see
    /// [`GraphConfig::link_spouse_children`]); those links are best effort and any
    /// that fail are reported in [`RelationshipOutcome::skipped`].
    pub fn add_relationship(
        &mut self,
        kind: RelationshipKind,
        person_a: PersonId,
        person_b: PersonId,
        metadata: RelationshipMetadata,
    ) -> Result<RelationshipOutcome, GraphError> {
        self.validate_relationship(kind, person_a, person_b, &metadata)?;

        // Children are gathered before anything is linked so that one side's
        // auto-links do not show up as the other side's existing children.
        let pending = if kind == RelationshipKind::Spouse && self.config.link_spouse_children {
            self.spouse_child_candidates(person_a, person_b)
        } else {
            Vec::new()
        };

        let relationship = Relationship::new(kind, person_a, person_b, metadata, current_timestamp());
        self.insert_relationship(relationship.clone());

        let mut outcome = RelationshipOutcome {
            relationship,
            auto_linked: Vec::new(),
            skipped: Vec::new(),
        };

        for (parent, child) in pending {
            let link = RelationshipMetadata::default();
            match self.validate_relationship(RelationshipKind::ParentChild, parent, child, &link) {
                Ok(()) => {
                    let rel = Relationship::new(
                        RelationshipKind::ParentChild,
                        parent,
                        child,
                        link,
                        current_timestamp(),
                    );
                    self.insert_relationship(rel.clone());
                    outcome.auto_linked.push(rel);
                }
                Err(reason) => {
                    tracing::debug!(
                        "Skipped automatic parent link {} -> {}: {}",
                        parent.short(),
                        child.short(),
                        reason
                    );
                    outcome.skipped.push(SkippedLink {
                        parent,
                        child,
                        reason,
                    });
                }
            }
        }

        Ok(outcome)
    }

    /// Replace a relationship's metadata
    pub fn update_relationship(
        &mut self,
        id: RelationshipId,
        metadata: RelationshipMetadata,
    ) -> Result<Relationship, GraphError> {
        let rel = self
            .relationships
            .get_mut(&id)
            .ok_or_else(|| GraphError::relationship_not_found(id))?;
        rules::check_marriage_dates(&metadata)?;

        rel.metadata = metadata;
        Ok(rel.clone())
    }

    /// Remove a relationship (no cascade)
    pub fn delete_relationship(&mut self, id: RelationshipId) -> Result<Relationship, GraphError> {
        self.remove_relationship(id)
            .ok_or_else(|| GraphError::relationship_not_found(id))
    }

    /// Run every structural check for a prospective relationship without writing
    pub fn validate_relationship(
        &self,
        kind: RelationshipKind,
        person_a: PersonId,
        person_b: PersonId,
        metadata: &RelationshipMetadata,
    ) -> Result<(), GraphError> {
        let a = self
            .people
            .get(&person_a)
            .ok_or_else(|| GraphError::person_not_found(person_a))?;
        let b = self
            .people
            .get(&person_b)
            .ok_or_else(|| GraphError::person_not_found(person_b))?;

        if person_a == person_b {
            return Err(ValidationError::SelfRelationship.into());
        }

        if self.pairs.contains_key(&PairKey::new(kind, person_a, person_b)) {
            return Err(ValidationError::DuplicateRelationship { kind }.into());
        }

        match kind {
            RelationshipKind::ParentChild => {
                rules::check_parent_birth(a, b)?;
                if self.is_ancestor_of(person_b, person_a) {
                    return Err(ValidationError::Cycle.into());
                }
            }
            RelationshipKind::Spouse => rules::check_marriage_dates(metadata)?,
            RelationshipKind::Sibling => {}
        }

        Ok(())
    }

    /// (parent, child) pairs a new marriage between `a` and `b` should add
    fn spouse_child_candidates(&self, a: PersonId, b: PersonId) -> Vec<(PersonId, PersonId)> {
        let mut pending = Vec::new();
        for (parent, other) in [(a, b), (b, a)] {
            let own = self.children_of(parent);
            for child in self.children_of(other) {
                if !own.contains(&child) && !pending.contains(&(parent, child)) {
                    pending.push((parent, child));
                }
            }
        }
        pending
    }

    pub(crate) fn insert_relationship(&mut self, relationship: Relationship) {
        let id = relationship.id;
        self.pairs.insert(
            PairKey::new(relationship.kind, relationship.person_a, relationship.person_b),
            id,
        );
        self.incidence.entry(relationship.person_a).or_default().push(id);
        self.incidence.entry(relationship.person_b).or_default().push(id);
        self.relationships.insert(id, relationship);
    }

    fn remove_relationship(&mut self, id: RelationshipId) -> Option<Relationship> {
        let rel = self.relationships.shift_remove(&id)?;
        self.pairs
            .remove(&PairKey::new(rel.kind, rel.person_a, rel.person_b));
        for person in [rel.person_a, rel.person_b] {
            if let Some(ids) = self.incidence.get_mut(&person) {
                ids.retain(|rid| *rid != id);
            }
        }
        Some(rel)
    }
}
