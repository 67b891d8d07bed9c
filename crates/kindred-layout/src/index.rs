//! Dense adjacency view of the graph used by the layout passes

use kindred_domain::{Person, PersonId, Position, Relationship, RelationshipKind};
use std::collections::HashMap;

/// People numbered by input order, with adjacency lists per relationship kind
#[derive(Debug, Default)]
pub(crate) struct FamilyIndex {
    pub ids: Vec<PersonId>,
    pub overrides: Vec<Option<Position>>,
    pub parents: Vec<Vec<usize>>,
    pub children: Vec<Vec<usize>>,
    pub spouses: Vec<Vec<usize>>,
    pub siblings: Vec<Vec<usize>>,
    /// Whether the person takes part in any relationship at all
    pub connected: Vec<bool>,
}

impl FamilyIndex {
    pub fn build<'a, P, R>(people: P, relationships: R) -> Self
    where
        P: IntoIterator<Item = &'a Person>,
        R: IntoIterator<Item = &'a Relationship>,
    {
        let mut index = FamilyIndex::default();
        let mut lookup: HashMap<PersonId, usize> = HashMap::new();
        for person in people {
            if lookup.contains_key(&person.id) {
                continue;
            }
            lookup.insert(person.id, index.ids.len());
            index.ids.push(person.id);
            index.overrides.push(person.position);
        }

        let n = index.ids.len();
        index.parents = vec![Vec::new(); n];
        index.children = vec![Vec::new(); n];
        index.spouses = vec![Vec::new(); n];
        index.siblings = vec![Vec::new(); n];
        index.connected = vec![false; n];

        let mut orphaned = 0usize;
        for rel in relationships {
            let (Some(&a), Some(&b)) = (lookup.get(&rel.person_a), lookup.get(&rel.person_b))
            else {
                orphaned += 1;
                continue;
            };
            if a == b {
                orphaned += 1;
                continue;
            }

            match rel.kind {
                RelationshipKind::ParentChild => {
                    push_unique(&mut index.parents[b], a);
                    push_unique(&mut index.children[a], b);
                }
                RelationshipKind::Spouse => {
                    push_unique(&mut index.spouses[a], b);
                    push_unique(&mut index.spouses[b], a);
                }
                RelationshipKind::Sibling => {
                    push_unique(&mut index.siblings[a], b);
                    push_unique(&mut index.siblings[b], a);
                }
            }
            index.connected[a] = true;
            index.connected[b] = true;
        }

        if orphaned > 0 {
            tracing::warn!(
                "Layout ignored {} relationship(s) referencing unknown people",
                orphaned
            );
        }

        index
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

fn push_unique(list: &mut Vec<usize>, value: usize) {
    if !list.contains(&value) {
        list.push(value);
    }
}
