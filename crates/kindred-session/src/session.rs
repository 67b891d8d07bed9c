//! The session: one graph, its layout, its physics and the repository behind them

use crate::import::{import, ImportReport};
use crate::{Result, SessionConfig, SessionError};
use kindred_domain::traits::FamilyRepository;
use kindred_domain::{
    GraphSnapshot, NewPerson, Person, PersonId, PersonPatch, Position, Relationship,
    RelationshipId, RelationshipKind, RelationshipMetadata,
};
use kindred_graph::{FamilyGraph, RelationshipOutcome, RestoreReport};
use kindred_layout::{compute_layout, Layout};
use kindred_physics::PhysicsEngine;

/// Orchestrates mutations across the graph, layout, physics and repository
///
/// Every mutation is validated and applied in memory first, then the layout is
/// recomputed and the physics re-anchored, and only then is the repository written.
/// A repository failure comes back as [`SessionError::Store`] while the in-memory
/// state keeps the accepted change.
///
/// # Examples
///
/// ```
/// use kindred_domain::{NewPerson, RelationshipKind};
/// use kindred_session::{FamilySession, SessionConfig};
/// use kindred_store::MemoryStore;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let (mut session, _) = FamilySession::open(MemoryStore::new(), SessionConfig::default())
///     .await
///     .unwrap();
///
/// let mum = session.add_person(NewPerson::named("Mum")).await.unwrap();
/// let kid = session.add_person(NewPerson::named("Kid")).await.unwrap();
/// session
///     .add_relationship(RelationshipKind::ParentChild, mum.id, kid.id, Default::default())
///     .await
///     .unwrap();
///
/// assert_eq!(session.layout().generation(kid.id), Some(1));
/// assert_eq!(session.repository().relationship_count(), 1);
/// # });
/// ```
pub struct FamilySession<R: FamilyRepository> {
    repo: R,
    config: SessionConfig,
    graph: FamilyGraph,
    layout: Layout,
    physics: PhysicsEngine,
}

impl<R: FamilyRepository> FamilySession<R> {
    /// Load everything the repository holds and lay it out
    ///
    /// Stored records that break an invariant are left out and listed in the report.
    pub async fn open(repo: R, config: SessionConfig) -> Result<(Self, RestoreReport)> {
        let people = repo.list_people().await.map_err(SessionError::store)?;
        let relationships = repo
            .list_relationships()
            .await
            .map_err(SessionError::store)?;

        let (graph, report) = FamilyGraph::restore(
            GraphSnapshot {
                people,
                relationships,
            },
            config.graph.clone(),
        );

        tracing::info!(
            "Opened session with {} people and {} relationships ({} stored records skipped)",
            report.people_restored,
            report.relationships_restored,
            report.skipped.len()
        );

        let physics = PhysicsEngine::new(config.physics.clone());
        let mut session = Self {
            repo,
            config,
            graph,
            layout: Layout::default(),
            physics,
        };
        session.relayout();
        Ok((session, report))
    }

    /// The configuration in use
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The canonical graph
    pub fn graph(&self) -> &FamilyGraph {
        &self.graph
    }

    /// The current layout
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The physics engine
    pub fn physics(&self) -> &PhysicsEngine {
        &self.physics
    }

    /// The repository
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Give back the repository
    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Recompute the layout from the graph and re-anchor the physics
    pub fn relayout(&mut self) {
        self.layout = compute_layout(
            self.graph.people(),
            self.graph.relationships(),
            &self.config.layout,
        );
        self.physics.sync_anchors(&self.layout);
    }

    /// Add a person
    pub async fn add_person(&mut self, fields: NewPerson) -> Result<Person> {
        let person = self.graph.add_person(fields)?;
        self.relayout();
        self.repo
            .save_person(&person)
            .await
            .map_err(SessionError::store)?;
        Ok(person)
    }

    /// Change a person's fields
    pub async fn update_person(&mut self, id: PersonId, patch: PersonPatch) -> Result<Person> {
        let person = self.graph.update_person(id, patch)?;
        self.relayout();
        self.repo
            .update_person(&person)
            .await
            .map_err(SessionError::store)?;
        Ok(person)
    }

    /// Remove a person and every relationship touching them
    ///
    /// A drag in progress on this person is cancelled.
    pub async fn delete_person(&mut self, id: PersonId) -> Result<(Person, Vec<Relationship>)> {
        let (person, removed) = self.graph.delete_person(id)?;
        self.relayout();
        for rel in &removed {
            self.repo
                .delete_relationship(rel.id)
                .await
                .map_err(SessionError::store)?;
        }
        self.repo
            .delete_person(id)
            .await
            .map_err(SessionError::store)?;
        Ok((person, removed))
    }

    /// Add a relationship, along with any automatic parent links
    pub async fn add_relationship(
        &mut self,
        kind: RelationshipKind,
        person_a: PersonId,
        person_b: PersonId,
        metadata: RelationshipMetadata,
    ) -> Result<RelationshipOutcome> {
        let outcome = self
            .graph
            .add_relationship(kind, person_a, person_b, metadata)?;
        self.relayout();
        for rel in outcome.created() {
            self.repo
                .save_relationship(rel)
                .await
                .map_err(SessionError::store)?;
        }
        Ok(outcome)
    }

    /// Replace a relationship's metadata
    pub async fn update_relationship(
        &mut self,
        id: RelationshipId,
        metadata: RelationshipMetadata,
    ) -> Result<Relationship> {
        let rel = self.graph.update_relationship(id, metadata)?;
        self.repo
            .update_relationship(&rel)
            .await
            .map_err(SessionError::store)?;
        Ok(rel)
    }

    /// Remove a relationship
    pub async fn delete_relationship(&mut self, id: RelationshipId) -> Result<Relationship> {
        let rel = self.graph.delete_relationship(id)?;
        self.relayout();
        self.repo
            .delete_relationship(id)
            .await
            .map_err(SessionError::store)?;
        Ok(rel)
    }

    /// Replace the whole family with an imported snapshot
    ///
    /// Records get fresh ids. Anything that cannot be imported is listed in the report;
    /// what was accepted replaces the repository content.
    pub async fn import_snapshot(&mut self, snapshot: GraphSnapshot) -> Result<ImportReport> {
        let (graph, report) = import(snapshot, self.config.graph.clone());
        self.graph = graph;
        self.relayout();
        tracing::info!("Imported snapshot: {}", report.summary());

        self.repo
            .import_all(self.graph.snapshot())
            .await
            .map_err(SessionError::store)?;
        Ok(report)
    }

    /// The whole family as plain records
    pub fn export_snapshot(&self) -> GraphSnapshot {
        self.graph.snapshot()
    }

    /// Advance the physics by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        self.physics.tick(dt);
    }

    /// Pick up a person
    pub fn start_drag(&mut self, id: PersonId) -> bool {
        self.physics.start_drag(id)
    }

    /// Move the person being dragged
    pub fn update_drag(&mut self, id: PersonId, target: Position) -> bool {
        self.physics.update_drag(id, target)
    }

    /// Drop a person without persisting the drop point
    pub fn end_drag(&mut self, id: PersonId) -> bool {
        self.physics.end_drag(id)
    }

    /// Drop a person and keep the drop point as their position
    ///
    /// Returns `Ok(false)` when no drag on this person was in progress.
    pub async fn commit_drag(&mut self, id: PersonId) -> Result<bool> {
        if !self.physics.end_drag(id) {
            return Ok(false);
        }
        let Some(anchor) = self.physics.anchor(id) else {
            return Ok(false);
        };

        let person = self.graph.update_person(id, PersonPatch::pin(anchor))?;
        self.relayout();
        tracing::debug!("Pinned {} at {:?}", person.name, anchor);
        self.repo
            .update_person(&person)
            .await
            .map_err(SessionError::store)?;
        Ok(true)
    }

    /// Hand a pinned person back to the layout
    ///
    /// Returns `Ok(false)` when the person had no stored position.
    pub async fn unpin(&mut self, id: PersonId) -> Result<bool> {
        let pinned = self
            .graph
            .person(id)
            .ok_or_else(|| kindred_graph::GraphError::person_not_found(id))?
            .position
            .is_some();
        if !pinned {
            self.physics.reset_manual(id);
            return Ok(false);
        }

        let patch = PersonPatch {
            position: Some(None),
            ..Default::default()
        };
        let person = self.graph.update_person(id, patch)?;
        self.relayout();
        self.physics.reset_manual(id);
        self.repo
            .update_person(&person)
            .await
            .map_err(SessionError::store)?;
        Ok(true)
    }

    /// Where a person is drawn right now
    pub fn live_position(&self, id: PersonId) -> Option<Position> {
        self.physics.live_position(id)
    }

    /// Whether a drag on this person is in progress
    pub fn is_dragging(&self, id: PersonId) -> bool {
        self.physics.is_dragging(id)
    }
}
