//! Layout behaviour on concrete families

use kindred_domain::{NewPerson, Person, PersonId, Position, Relationship, RelationshipKind};
use kindred_graph::FamilyGraph;
use kindred_layout::{compute_layout, BoundingBox, Layout, LayoutConfig};

const NO_LINKS: &[Relationship] = &[];

fn add(graph: &mut FamilyGraph, name: &str) -> PersonId {
    graph.add_person(NewPerson::named(name)).unwrap().id
}

fn link(graph: &mut FamilyGraph, kind: RelationshipKind, a: PersonId, b: PersonId) {
    graph.add_relationship(kind, a, b, Default::default()).unwrap();
}

fn person(name: &str) -> Person {
    Person::from_new(NewPerson::named(name), 0)
}

fn rel(kind: RelationshipKind, a: &Person, b: &Person) -> Relationship {
    Relationship::new(kind, a.id, b.id, Default::default(), 0)
}

fn layout_of(graph: &FamilyGraph) -> Layout {
    compute_layout(graph.people(), graph.relationships(), &LayoutConfig::default())
}

fn at(layout: &Layout, id: PersonId) -> Position {
    layout.position(id).unwrap()
}

#[test]
fn test_three_generation_family() {
    let mut graph = FamilyGraph::default();
    let grandpa = add(&mut graph, "Grandpa");
    let grandma = add(&mut graph, "Grandma");
    let dad = add(&mut graph, "Dad");
    let mom = add(&mut graph, "Mom");
    let child1 = add(&mut graph, "Child 1");
    let child2 = add(&mut graph, "Child 2");

    link(&mut graph, RelationshipKind::Spouse, grandpa, grandma);
    link(&mut graph, RelationshipKind::ParentChild, grandpa, dad);
    link(&mut graph, RelationshipKind::ParentChild, dad, child1);
    link(&mut graph, RelationshipKind::ParentChild, dad, child2);
    link(&mut graph, RelationshipKind::Spouse, dad, mom);

    let layout = layout_of(&graph);

    let generations: Vec<u32> = [grandpa, grandma, dad, mom, child1, child2]
        .iter()
        .map(|id| layout.generation(*id).unwrap())
        .collect();
    assert_eq!(generations, vec![0, 0, 1, 1, 2, 2]);

    assert_eq!(at(&layout, grandpa), Position::new(-0.75, 0.0, 0.0));
    assert_eq!(at(&layout, grandma), Position::new(0.75, 0.0, 0.0));
    // Dad hangs under Grandpa, his only recorded parent
    assert_eq!(at(&layout, dad), Position::new(-1.5, -4.0, 0.0));
    assert_eq!(at(&layout, mom), Position::new(0.0, -4.0, 0.0));
    // Children centred under the couple
    assert_eq!(at(&layout, child1), Position::new(-2.25, -8.0, 0.0));
    assert_eq!(at(&layout, child2), Position::new(0.75, -8.0, 0.0));

    assert_eq!(layout.bounds.min, Position::new(-2.25, -8.0, 0.0));
    assert_eq!(layout.bounds.max, Position::new(0.75, 0.0, 0.0));
    assert_eq!(layout.bounds.center, Position::new(-0.75, -4.0, 0.0));
}

#[test]
fn test_empty_input() {
    let layout = compute_layout(
        std::iter::empty::<&Person>(),
        std::iter::empty::<&Relationship>(),
        &LayoutConfig::default(),
    );
    assert!(layout.is_empty());
    assert!(layout.generations.is_empty());
    assert_eq!(layout.bounds, BoundingBox::default());
}

#[test]
fn test_single_person_at_origin() {
    let me = person("Me");
    let layout = compute_layout(&[me.clone()], NO_LINKS, &LayoutConfig::default());
    assert_eq!(layout.len(), 1);
    assert_eq!(at(&layout, me.id), Position::zeros());
    assert!(at(&layout, me.id).z.is_sign_positive());
    assert_eq!(layout.generation(me.id), Some(0));

    let json = serde_json::to_string(&layout).unwrap();
    assert!(!json.contains("-0.0"));
}

#[test]
fn test_unrelated_people_share_the_root_row() {
    let people = [person("A"), person("B")];
    let layout = compute_layout(&people, NO_LINKS, &LayoutConfig::default());
    assert_eq!(at(&layout, people[0].id), Position::new(-1.5, 0.0, 0.0));
    assert_eq!(at(&layout, people[1].id), Position::new(1.5, 0.0, 0.0));
}

#[test]
fn test_connected_roots_before_loners() {
    let loner = person("Loner");
    let parent = person("Parent");
    let child = person("Child");
    let rels = [rel(RelationshipKind::ParentChild, &parent, &child)];

    let layout = compute_layout(
        &[loner.clone(), parent.clone(), child.clone()],
        &rels,
        &LayoutConfig::default(),
    );

    assert_eq!(at(&layout, parent.id).x, -1.5);
    assert_eq!(at(&layout, loner.id).x, 1.5);
    assert_eq!(at(&layout, child.id).x, at(&layout, parent.id).x);
}

#[test]
fn test_spouses_share_a_row_at_couple_spacing() {
    let a = person("A");
    let b = person("B");
    let rels = [rel(RelationshipKind::Spouse, &a, &b)];
    let layout = compute_layout(&[a.clone(), b.clone()], &rels, &LayoutConfig::default());

    let (pa, pb) = (at(&layout, a.id), at(&layout, b.id));
    assert_eq!(pa.y, pb.y);
    assert_eq!((pb.x - pa.x).abs(), 1.5);
}

#[test]
fn test_remarriage_puts_half_siblings_on_another_layer() {
    let father = person("Father");
    let first = person("First wife");
    let second = person("Second wife");
    let elder = person("Elder");
    let younger = person("Younger");
    let rels = [
        rel(RelationshipKind::Spouse, &father, &first),
        rel(RelationshipKind::Spouse, &father, &second),
        rel(RelationshipKind::ParentChild, &father, &elder),
        rel(RelationshipKind::ParentChild, &first, &elder),
        rel(RelationshipKind::ParentChild, &father, &younger),
        rel(RelationshipKind::ParentChild, &second, &younger),
    ];
    let people = [
        father.clone(),
        first.clone(),
        second.clone(),
        elder.clone(),
        younger.clone(),
    ];

    let layout = compute_layout(&people, &rels, &LayoutConfig::default());

    // Twice-married father sits between his wives
    assert_eq!(at(&layout, second.id).x, -1.5);
    assert_eq!(at(&layout, father.id).x, 0.0);
    assert_eq!(at(&layout, first.id).x, 1.5);

    assert_eq!(at(&layout, younger.id), Position::new(-0.75, -4.0, 0.0));
    assert_eq!(at(&layout, elder.id), Position::new(2.25, -4.0, 1.0));
}

#[test]
fn test_sibling_linked_roots_stay_together() {
    let a = person("A");
    let loner = person("Loner");
    let b = person("B");
    let rels = [rel(RelationshipKind::Sibling, &a, &b)];
    let layout = compute_layout(
        &[a.clone(), loner.clone(), b.clone()],
        &rels,
        &LayoutConfig::default(),
    );

    // One cluster of two siblings, then the loner
    assert_eq!(at(&layout, a.id).x, -3.0);
    assert_eq!(at(&layout, b.id).x, 0.0);
    assert_eq!(at(&layout, loner.id).x, 3.0);
}

#[test]
fn test_unknown_references_are_ignored() {
    let a = person("A");
    let ghost = person("Ghost");
    let rels = [rel(RelationshipKind::ParentChild, &ghost, &a)];
    let layout = compute_layout(&[a.clone()], &rels, &LayoutConfig::default());

    assert_eq!(layout.len(), 1);
    assert_eq!(layout.generation(a.id), Some(0));
    assert!(layout.position(ghost.id).is_none());
}

#[test]
fn test_cycle_does_not_panic() {
    let a = person("A");
    let b = person("B");
    let rels = [
        rel(RelationshipKind::ParentChild, &a, &b),
        rel(RelationshipKind::ParentChild, &b, &a),
    ];
    let layout = compute_layout(&[a, b], &rels, &LayoutConfig::default());
    assert_eq!(layout.len(), 2);
}

#[test]
fn test_custom_spacing() {
    let parent = person("Parent");
    let child = person("Child");
    let rels = [rel(RelationshipKind::ParentChild, &parent, &child)];
    let config = LayoutConfig {
        vertical_spacing: 10.0,
        ..LayoutConfig::default()
    };

    let layout = compute_layout(&[parent, child.clone()], &rels, &config);
    assert_eq!(at(&layout, child.id).y, -10.0);
}

#[test]
fn test_override_replaces_anchor() {
    let parent = person("Parent");
    let mut child = person("Child");
    let pinned = Position::new(7.0, 1.0, -2.0);
    child.position = Some(pinned);
    let rels = [rel(RelationshipKind::ParentChild, &parent, &child)];

    let layout = compute_layout(&[parent, child.clone()], &rels, &LayoutConfig::default());

    assert_eq!(at(&layout, child.id), pinned);
    assert_eq!(layout.generation(child.id), Some(1));
    assert_eq!(layout.bounds.max.x, 7.0);
}

#[test]
fn test_marrying_your_own_child_keeps_rows_apart() {
    let mut graph = FamilyGraph::default();
    let parent = add(&mut graph, "Parent");
    let child = add(&mut graph, "Child");
    link(&mut graph, RelationshipKind::ParentChild, parent, child);
    link(&mut graph, RelationshipKind::Spouse, parent, child);

    let layout = layout_of(&graph);
    assert_eq!(layout.generation(parent), Some(0));
    assert_eq!(layout.generation(child), Some(1));
    assert_eq!(at(&layout, child).y, -4.0);
}

#[test]
fn test_couples_who_are_each_others_in_laws() {
    let mut graph = FamilyGraph::default();
    let strangers: Vec<PersonId> = (0..50).map(|_| add(&mut graph, "Stranger")).collect();
    let mother = add(&mut graph, "Mother");
    let son = add(&mut graph, "Son");
    let widow = add(&mut graph, "Widow");
    let daughter = add(&mut graph, "Daughter");

    link(&mut graph, RelationshipKind::ParentChild, mother, son);
    link(&mut graph, RelationshipKind::ParentChild, widow, daughter);
    link(&mut graph, RelationshipKind::Spouse, mother, daughter);
    let outcome = graph
        .add_relationship(RelationshipKind::Spouse, son, widow, Default::default())
        .unwrap();
    assert_eq!(outcome.skipped.len(), 1);

    let layout = layout_of(&graph);
    let rows: Vec<u32> = [mother, son, widow, daughter]
        .iter()
        .map(|id| layout.generation(*id).unwrap())
        .collect();
    assert_eq!(rows, vec![0, 2, 0, 1]);
    assert_eq!(at(&layout, son).y, -8.0);
    assert!(strangers.iter().all(|id| layout.generation(*id) == Some(0)));

    for rel in graph.relationships() {
        if rel.kind == RelationshipKind::ParentChild {
            assert!(layout.generation(rel.person_a) < layout.generation(rel.person_b));
        }
    }
    assert_eq!(layout.bounds.min.y, -8.0);
}

#[test]
fn test_layout_serializes() {
    let me = person("Me");
    let layout = compute_layout(&[me.clone()], NO_LINKS, &LayoutConfig::default());
    let json = serde_json::to_value(&layout).unwrap();
    assert!(json["positions"][me.id.to_string()].is_array());
    assert_eq!(json["generations"][me.id.to_string()], 0);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Grow a family one step at a time: new root, child of someone, a new spouse, or
    /// (when `tangled`) a marriage or parent link between two people already present
    fn family_strategy() -> impl Strategy<Value = Vec<(u8, usize, usize)>> {
        prop::collection::vec((0u8..5, any::<usize>(), any::<usize>()), 1..30)
    }

    fn grow(steps: &[(u8, usize, usize)], tangled: bool) -> FamilyGraph {
        let mut graph = FamilyGraph::default();
        for &(step, pick, other_pick) in steps {
            let ids: Vec<PersonId> = graph.people().map(|p| p.id).collect();
            if ids.is_empty() {
                add(&mut graph, "Someone");
                continue;
            }
            let other = ids[pick % ids.len()];
            let existing = ids[other_pick % ids.len()];
            match step {
                1 => {
                    let new = add(&mut graph, "Someone");
                    link(&mut graph, RelationshipKind::ParentChild, other, new);
                }
                2 => {
                    let new = add(&mut graph, "Someone");
                    link(&mut graph, RelationshipKind::Spouse, other, new);
                }
                // Rejected links (cycles, duplicates, self links) are part of the game
                3 if tangled => {
                    let _ = graph.add_relationship(
                        RelationshipKind::Spouse,
                        other,
                        existing,
                        Default::default(),
                    );
                }
                4 if tangled => {
                    let _ = graph.add_relationship(
                        RelationshipKind::ParentChild,
                        other,
                        existing,
                        Default::default(),
                    );
                }
                _ => {
                    add(&mut graph, "Someone");
                }
            }
        }
        graph
    }

    proptest! {
        #[test]
        fn prop_layout_is_deterministic(steps in family_strategy()) {
            let graph = grow(&steps, true);
            prop_assert_eq!(layout_of(&graph), layout_of(&graph));
        }

        #[test]
        fn prop_rows_follow_the_family(steps in family_strategy()) {
            let graph = grow(&steps, false);
            let layout = layout_of(&graph);
            prop_assert_eq!(layout.len(), graph.person_count());

            for rel in graph.relationships() {
                let (a, b) = (rel.person_a, rel.person_b);
                let (ga, gb) = (layout.generation(a).unwrap(), layout.generation(b).unwrap());
                let (pa, pb) = (at(&layout, a), at(&layout, b));
                match rel.kind {
                    RelationshipKind::ParentChild => {
                        prop_assert!(ga < gb);
                        prop_assert!(pa.y > pb.y);
                    }
                    RelationshipKind::Spouse => {
                        prop_assert_eq!(ga, gb);
                        prop_assert_eq!(pa.y, pb.y);
                    }
                    RelationshipKind::Sibling => {}
                }
            }
        }

        #[test]
        fn prop_row_members_do_not_overlap(steps in family_strategy()) {
            let graph = grow(&steps, true);
            let layout = layout_of(&graph);
            let config = LayoutConfig::default();

            let placed: Vec<(u32, f64)> = graph
                .people()
                .map(|p| (layout.generation(p.id).unwrap(), at(&layout, p.id).x))
                .collect();
            for (i, (ga, xa)) in placed.iter().enumerate() {
                for (gb, xb) in &placed[i + 1..] {
                    if ga == gb {
                        prop_assert!((xa - xb).abs() >= config.couple_spacing - 1e-9);
                    }
                }
            }
        }

        #[test]
        fn prop_children_sit_below_parents_in_any_family(steps in family_strategy()) {
            let graph = grow(&steps, true);
            let layout = layout_of(&graph);
            let people = graph.person_count() as u32;

            for person in graph.people() {
                let row = layout.generation(person.id).unwrap();
                prop_assert!(row < people);
                prop_assert!(row >= graph.generation_of(person.id).unwrap());
            }
            for rel in graph.relationships() {
                if rel.kind == RelationshipKind::ParentChild {
                    let (ga, gb) = (
                        layout.generation(rel.person_a).unwrap(),
                        layout.generation(rel.person_b).unwrap(),
                    );
                    prop_assert!(ga < gb);
                    prop_assert!(at(&layout, rel.person_a).y > at(&layout, rel.person_b).y);
                }
            }
        }
    }
}
