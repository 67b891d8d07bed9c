//! Derived relations, computed on demand from the relationship set
//!
//! Nothing here is cached on the entities. Transitive walks are iterative with a
//! visited set, so they terminate even on a graph that somehow contains a cycle.

use crate::FamilyGraph;
use indexmap::IndexMap;
use kindred_domain::{PersonId, RelationshipKind};
use std::collections::{HashMap, HashSet, VecDeque};

impl FamilyGraph {
    /// People linked to `id` by a relationship of `kind`, filtered by direction
    fn linked(&self, id: PersonId, kind: RelationshipKind, as_child: Option<bool>) -> Vec<PersonId> {
        let mut out = Vec::new();
        for rel in self.relationships_of(id) {
            if rel.kind != kind {
                continue;
            }
            let other = match as_child {
                Some(true) if rel.person_b == id => rel.person_a,
                Some(false) if rel.person_a == id => rel.person_b,
                None => match rel.other(id) {
                    Some(other) => other,
                    None => continue,
                },
                _ => continue,
            };
            if !out.contains(&other) {
                out.push(other);
            }
        }
        out
    }

    /// Direct parents
    pub fn parents_of(&self, id: PersonId) -> Vec<PersonId> {
        self.linked(id, RelationshipKind::ParentChild, Some(true))
    }

    /// Direct children
    pub fn children_of(&self, id: PersonId) -> Vec<PersonId> {
        self.linked(id, RelationshipKind::ParentChild, Some(false))
    }

    /// Current and former spouses
    pub fn spouses_of(&self, id: PersonId) -> Vec<PersonId> {
        self.linked(id, RelationshipKind::Spouse, None)
    }

    /// People sharing at least one parent, plus explicit siblings
    pub fn siblings_of(&self, id: PersonId) -> Vec<PersonId> {
        let mut out = self.linked(id, RelationshipKind::Sibling, None);
        for parent in self.parents_of(id) {
            for child in self.children_of(parent) {
                if child != id && !out.contains(&child) {
                    out.push(child);
                }
            }
        }
        out
    }

    /// Transitive closure over parents, nearest first
    pub fn ancestors_of(&self, id: PersonId) -> Vec<PersonId> {
        self.walk(id, |graph, person| graph.parents_of(person))
    }

    /// Transitive closure over children, nearest first
    pub fn descendants_of(&self, id: PersonId) -> Vec<PersonId> {
        self.walk(id, |graph, person| graph.children_of(person))
    }

    /// Whether `candidate` appears among the ancestors of `id`
    pub fn is_ancestor_of(&self, candidate: PersonId, id: PersonId) -> bool {
        let mut visited = HashSet::from([id]);
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            for parent in self.parents_of(current) {
                if parent == candidate {
                    return true;
                }
                if visited.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        false
    }

    /// Breadth-first walk excluding the start person
    fn walk<F>(&self, start: PersonId, next: F) -> Vec<PersonId>
    where
        F: Fn(&FamilyGraph, PersonId) -> Vec<PersonId>,
    {
        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        let mut out = Vec::new();
        while let Some(current) = queue.pop_front() {
            for person in next(self, current) {
                if visited.insert(person) {
                    out.push(person);
                    queue.push_back(person);
                }
            }
        }
        out
    }

    /// Generation of every person: 0 without parents, else 1 + the oldest parent's
    ///
    /// Longest path from the roots, computed once per call in topological order.
    pub fn generations(&self) -> IndexMap<PersonId, u32> {
        let mut generation: IndexMap<PersonId, u32> =
            self.people.keys().map(|id| (*id, 0)).collect();
        let mut pending: HashMap<PersonId, usize> = self
            .people
            .keys()
            .map(|id| (*id, self.parents_of(*id).len()))
            .collect();

        let mut queue: VecDeque<PersonId> = self
            .people
            .keys()
            .filter(|id| pending.get(*id) == Some(&0))
            .copied()
            .collect();

        while let Some(parent) = queue.pop_front() {
            let depth = generation.get(&parent).copied().unwrap_or(0);
            for child in self.children_of(parent) {
                if let Some(g) = generation.get_mut(&child) {
                    *g = (*g).max(depth + 1);
                }
                if let Some(count) = pending.get_mut(&child) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        queue.push_back(child);
                    }
                }
            }
        }

        generation
    }

    /// Generation of one person
    pub fn generation_of(&self, id: PersonId) -> Option<u32> {
        if !self.people.contains_key(&id) {
            return None;
        }
        self.generations().get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use crate::FamilyGraph;
    use kindred_domain::{NewPerson, PersonId, RelationshipKind};

    struct Family {
        graph: FamilyGraph,
        grandpa: PersonId,
        dad: PersonId,
        aunt: PersonId,
        kid: PersonId,
        cousin: PersonId,
    }

    fn family() -> Family {
        let mut graph = FamilyGraph::default();
        let mut add = |name: &str| graph.add_person(NewPerson::named(name)).unwrap().id;
        let grandpa = add("Grandpa");
        let dad = add("Dad");
        let aunt = add("Aunt");
        let kid = add("Kid");
        let cousin = add("Cousin");

        for (parent, child) in [(grandpa, dad), (grandpa, aunt), (dad, kid), (aunt, cousin)] {
            graph
                .add_relationship(RelationshipKind::ParentChild, parent, child, Default::default())
                .unwrap();
        }

        Family {
            graph,
            grandpa,
            dad,
            aunt,
            kid,
            cousin,
        }
    }

    #[test]
    fn test_parents_and_children() {
        let f = family();
        assert_eq!(f.graph.parents_of(f.dad), vec![f.grandpa]);
        assert_eq!(f.graph.children_of(f.grandpa), vec![f.dad, f.aunt]);
        assert!(f.graph.parents_of(f.grandpa).is_empty());
    }

    #[test]
    fn test_siblings_share_a_parent() {
        let f = family();
        assert_eq!(f.graph.siblings_of(f.dad), vec![f.aunt]);
        assert!(f.graph.siblings_of(f.kid).is_empty());
    }

    #[test]
    fn test_explicit_siblings_included() {
        let mut f = family();
        f.graph
            .add_relationship(RelationshipKind::Sibling, f.kid, f.cousin, Default::default())
            .unwrap();
        assert_eq!(f.graph.siblings_of(f.cousin), vec![f.kid]);
    }

    #[test]
    fn test_transitive_closures() {
        let f = family();
        assert_eq!(f.graph.ancestors_of(f.kid), vec![f.dad, f.grandpa]);
        assert_eq!(
            f.graph.descendants_of(f.grandpa),
            vec![f.dad, f.aunt, f.kid, f.cousin]
        );
        assert!(f.graph.is_ancestor_of(f.grandpa, f.cousin));
        assert!(!f.graph.is_ancestor_of(f.dad, f.cousin));
    }

    #[test]
    fn test_spouses() {
        let mut f = family();
        let mum = f.graph.add_person(NewPerson::named("Mum")).unwrap().id;
        f.graph
            .add_relationship(RelationshipKind::Spouse, mum, f.dad, Default::default())
            .unwrap();
        assert_eq!(f.graph.spouses_of(f.dad), vec![mum]);
        assert_eq!(f.graph.spouses_of(mum), vec![f.dad]);
        // Auto-linked to dad's child
        assert_eq!(f.graph.children_of(mum), vec![f.kid]);
    }

    #[test]
    fn test_generations() {
        let f = family();
        let generations = f.graph.generations();
        assert_eq!(generations[&f.grandpa], 0);
        assert_eq!(generations[&f.dad], 1);
        assert_eq!(generations[&f.cousin], 2);
        assert_eq!(f.graph.generation_of(f.kid), Some(2));
        assert_eq!(f.graph.generation_of(PersonId::new()), None);
    }

    #[test]
    fn test_generation_uses_longest_path() {
        let mut f = family();
        // Kid also gets grandpa as a direct "parent"; still generation 2
        f.graph
            .add_relationship(RelationshipKind::ParentChild, f.grandpa, f.kid, Default::default())
            .unwrap();
        assert_eq!(f.graph.generation_of(f.kid), Some(2));
    }
}
