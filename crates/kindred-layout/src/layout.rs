//! Layout entry point and result type

use crate::bounds::BoundingBox;
use crate::generation::assign_generations;
use crate::index::FamilyIndex;
use crate::placement::place;
use crate::LayoutConfig;
use indexmap::IndexMap;
use kindred_domain::{Person, PersonId, Position, Relationship};
use serde::{Deserialize, Serialize};

/// Anchor position and generation of every person
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Anchor per person, in input order
    pub positions: IndexMap<PersonId, Position>,

    /// Layout generation per person (spouse-aligned)
    pub generations: IndexMap<PersonId, u32>,

    /// Box around all positions
    pub bounds: BoundingBox,
}

impl Layout {
    /// Anchor of one person
    pub fn position(&self, id: PersonId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    /// Row of one person
    pub fn generation(&self, id: PersonId) -> Option<u32> {
        self.generations.get(&id).copied()
    }

    /// Number of people laid out
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether nobody was laid out
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Compute anchor positions for a set of people and relationships
///
/// Pure: the result depends only on the inputs and their order. Relationships
/// that name unknown people are ignored.
///
/// # Examples
///
/// ```
/// use kindred_domain::{NewPerson, Person, PersonId, Relationship, RelationshipKind};
/// use kindred_layout::{compute_layout, LayoutConfig};
///
/// let parent = Person::from_new(NewPerson::named("Parent"), 0);
/// let child = Person::from_new(NewPerson::named("Child"), 0);
/// let link = Relationship::new(
///     RelationshipKind::ParentChild,
///     parent.id,
///     child.id,
///     Default::default(),
///     0,
/// );
///
/// let layout = compute_layout(&[parent.clone(), child.clone()], &[link], &LayoutConfig::default());
/// assert_eq!(layout.generation(child.id), Some(1));
/// assert_eq!(layout.position(child.id).unwrap().y, -4.0);
/// ```
pub fn compute_layout<'a, P, R>(people: P, relationships: R, config: &LayoutConfig) -> Layout
where
    P: IntoIterator<Item = &'a Person>,
    R: IntoIterator<Item = &'a Relationship>,
{
    let index = FamilyIndex::build(people, relationships);
    if index.len() == 0 {
        return Layout::default();
    }

    let generation = assign_generations(&index);
    let mut anchors = place(&index, &generation, config);

    let mut pinned = 0usize;
    for (anchor, pin) in anchors.iter_mut().zip(&index.overrides) {
        if let Some(pin) = pin {
            *anchor = *pin;
            pinned += 1;
        }
    }

    let positions: IndexMap<PersonId, Position> =
        index.ids.iter().copied().zip(anchors).collect();
    let generations: IndexMap<PersonId, u32> =
        index.ids.iter().copied().zip(generation).collect();
    let bounds = BoundingBox::from_points(positions.values());

    tracing::debug!(
        "Laid out {} people over {} generation(s), {} pinned",
        positions.len(),
        generations.values().max().map_or(0, |g| g + 1),
        pinned
    );

    Layout {
        positions,
        generations,
        bounds,
    }
}
