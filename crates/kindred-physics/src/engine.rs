//! The interaction engine: bodies, clock and the drag state machine

use crate::body::{clamp_to_radius, Body};
use crate::PhysicsConfig;
use indexmap::IndexMap;
use kindred_domain::{PersonId, Position};
use kindred_layout::Layout;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;

/// A stalled frame never replays more than this many steps
const MAX_SUBSTEPS: usize = 240;

/// Live positions for every person, sprung to their layout anchors
///
/// # Examples
///
/// ```
/// use kindred_domain::{NewPerson, Person, Position, Relationship};
/// use kindred_layout::{compute_layout, LayoutConfig};
/// use kindred_physics::{PhysicsConfig, PhysicsEngine};
///
/// let me = Person::from_new(NewPerson::named("Me"), 0);
/// let layout = compute_layout([&me], Vec::<&Relationship>::new(), &LayoutConfig::default());
///
/// let mut engine = PhysicsEngine::new(PhysicsConfig::still());
/// engine.sync_anchors(&layout);
///
/// assert!(engine.start_drag(me.id));
/// assert!(engine.update_drag(me.id, Position::new(10.0, 0.0, 0.0)));
/// // Clamped to the drag radius around the anchor
/// assert_eq!(engine.live_position(me.id), Some(Position::new(3.0, 0.0, 0.0)));
/// assert!(engine.end_drag(me.id));
/// assert!(engine.is_manual(me.id));
/// ```
#[derive(Debug)]
pub struct PhysicsEngine {
    config: PhysicsConfig,
    bodies: IndexMap<PersonId, Body>,
    rng: StdRng,
    clock: f64,
}

impl PhysicsEngine {
    /// Create an empty engine
    pub fn new(config: PhysicsConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            bodies: IndexMap::new(),
            rng,
            clock: 0.0,
        }
    }

    /// The tuning in use
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Seconds simulated so far
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Follow a new layout
    ///
    /// New people appear on their anchor; people missing from the layout are dropped,
    /// cancelling any drag on them. Hand-placed and dragged bodies keep their anchor;
    /// everyone else glides to the new position.
    pub fn sync_anchors(&mut self, layout: &Layout) {
        let before = self.bodies.len();
        self.bodies.retain(|id, body| {
            let keep = layout.positions.contains_key(id);
            if !keep && body.dragging {
                tracing::debug!("Drag on {} cancelled: person removed", id);
            }
            keep
        });
        let removed = before - self.bodies.len();

        let mut added = 0usize;
        let mut moved = 0usize;
        for (id, anchor) in &layout.positions {
            match self.bodies.get_mut(id) {
                Some(body) => {
                    body.rest_anchor = *anchor;
                    if !body.dragging && !body.manual && body.drag_anchor != *anchor {
                        body.drag_anchor = *anchor;
                        body.settled = false;
                        moved += 1;
                    }
                }
                None => {
                    let phase = [
                        self.rng.gen_range(0.0..TAU),
                        self.rng.gen_range(0.0..TAU),
                        self.rng.gen_range(0.0..TAU),
                    ];
                    self.bodies.insert(*id, Body::new(*anchor, phase));
                    added += 1;
                }
            }
        }

        tracing::debug!(
            "Re-anchored bodies: {} added, {} removed, {} moved",
            added,
            removed,
            moved
        );
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let max_step = if self.config.max_step > 0.0 {
            self.config.max_step
        } else {
            dt
        };
        let steps = ((dt / max_step).ceil() as usize).clamp(1, MAX_SUBSTEPS);
        let h = (dt / steps as f64).min(max_step);
        let start = self.clock;

        for i in 1..=steps {
            let now = start + h * i as f64;
            for body in self.bodies.values_mut() {
                body.step(h, now, &self.config);
            }
        }
        self.clock = start + dt;
    }

    /// Pick up a person; `false` if unknown or already dragging
    pub fn start_drag(&mut self, id: PersonId) -> bool {
        let Some(body) = self.bodies.get_mut(&id) else {
            return false;
        };
        if body.dragging {
            return false;
        }
        body.dragging = true;
        body.settled = false;
        body.velocity = Position::zeros();
        body.base = body.position;
        body.sampled_at = self.clock;
        true
    }

    /// Move a dragged person towards `target`, kept within the drag radius
    ///
    /// `false` if the person is unknown, not being dragged, or the target is not finite.
    pub fn update_drag(&mut self, id: PersonId, target: Position) -> bool {
        let Some(body) = self.bodies.get_mut(&id) else {
            return false;
        };
        if !body.dragging || !target.iter().all(|c| c.is_finite()) {
            return false;
        }
        let clamped = clamp_to_radius(target, body.drag_anchor, self.config.max_drag_radius);
        body.drag_to(clamped, self.clock);
        true
    }

    /// Drop a dragged person where they are; the drop point becomes their anchor
    pub fn end_drag(&mut self, id: PersonId) -> bool {
        let Some(body) = self.bodies.get_mut(&id) else {
            return false;
        };
        if !body.dragging {
            return false;
        }
        body.dragging = false;
        body.manual = true;
        body.drag_anchor = body.position;
        // Keep the drawn position continuous once drift resumes
        body.base = body.position - body.drift(self.clock, &self.config);
        true
    }

    /// Forget a manual placement and return to the layout anchor
    pub fn reset_manual(&mut self, id: PersonId) -> bool {
        let Some(body) = self.bodies.get_mut(&id) else {
            return false;
        };
        if body.dragging || !body.manual {
            return false;
        }
        body.manual = false;
        body.drag_anchor = body.rest_anchor;
        body.settled = false;
        true
    }

    /// Where a person is drawn right now
    pub fn live_position(&self, id: PersonId) -> Option<Position> {
        self.bodies.get(&id).map(Body::position)
    }

    /// Where a person's spring pulls towards
    pub fn anchor(&self, id: PersonId) -> Option<Position> {
        self.bodies.get(&id).map(Body::anchor)
    }

    /// Full state of one body
    pub fn body(&self, id: PersonId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    /// Whether a drag on this person is in progress
    pub fn is_dragging(&self, id: PersonId) -> bool {
        self.bodies.get(&id).is_some_and(Body::is_dragging)
    }

    /// Whether this person was placed by hand
    pub fn is_manual(&self, id: PersonId) -> bool {
        self.bodies.get(&id).is_some_and(Body::is_manual)
    }

    /// Live positions of everyone, in layout order
    pub fn live_positions(&self) -> impl Iterator<Item = (PersonId, Position)> + '_ {
        self.bodies.iter().map(|(id, body)| (*id, body.position))
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether there are no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}
