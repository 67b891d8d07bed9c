//! Drag and re-layout scenarios against real layouts

use kindred_domain::{NewPerson, PersonId, Position, RelationshipKind};
use kindred_graph::FamilyGraph;
use kindred_layout::{compute_layout, Layout, LayoutConfig};
use kindred_physics::{PhysicsConfig, PhysicsEngine};

fn layout_of(graph: &FamilyGraph) -> Layout {
    compute_layout(graph.people(), graph.relationships(), &LayoutConfig::default())
}

fn add(graph: &mut FamilyGraph, name: &str) -> PersonId {
    graph.add_person(NewPerson::named(name)).unwrap().id
}

fn run(engine: &mut PhysicsEngine, seconds: f64) {
    let frames = (seconds * 60.0) as usize;
    for _ in 0..frames {
        engine.tick(1.0 / 60.0);
    }
}

fn family() -> (FamilyGraph, PersonId, PersonId) {
    let mut graph = FamilyGraph::default();
    let parent = add(&mut graph, "Parent");
    let child = add(&mut graph, "Child");
    graph
        .add_relationship(RelationshipKind::ParentChild, parent, child, Default::default())
        .unwrap();
    (graph, parent, child)
}

#[test]
fn test_manual_placement_survives_relayout() {
    let (mut graph, parent, child) = family();
    let mut engine = PhysicsEngine::new(PhysicsConfig::still());
    engine.sync_anchors(&layout_of(&graph));

    let anchor = engine.anchor(child).unwrap();
    let drop = anchor + Position::new(1.0, 0.5, 0.0);
    assert!(engine.start_drag(child));
    assert!(engine.update_drag(child, drop));
    assert!(engine.end_drag(child));

    // An unrelated person joins the root row and shifts the layout
    add(&mut graph, "Stranger");
    let relaid = layout_of(&graph);
    assert_ne!(relaid.position(parent), Some(engine.anchor(parent).unwrap()));
    engine.sync_anchors(&relaid);
    run(&mut engine, 5.0);

    assert_eq!(engine.anchor(child), Some(drop));
    assert_eq!(engine.live_position(child), Some(drop));
    assert_eq!(engine.live_position(parent), relaid.position(parent));
    assert_eq!(engine.body(child).unwrap().rest_anchor(), relaid.position(child).unwrap());
}

#[test]
fn test_removed_person_cancels_drag() {
    let (mut graph, _, child) = family();
    let mut engine = PhysicsEngine::new(PhysicsConfig::default());
    engine.sync_anchors(&layout_of(&graph));

    assert!(engine.start_drag(child));
    graph.delete_person(child).unwrap();
    engine.sync_anchors(&layout_of(&graph));

    assert_eq!(engine.len(), 1);
    assert!(!engine.is_dragging(child));
    assert!(!engine.update_drag(child, Position::zeros()));
    assert!(!engine.end_drag(child));
    assert_eq!(engine.live_position(child), None);
}

#[test]
fn test_release_springs_back_to_drop_point() {
    let (graph, _, child) = family();
    let mut engine = PhysicsEngine::new(PhysicsConfig::still());
    engine.sync_anchors(&layout_of(&graph));
    let anchor = engine.anchor(child).unwrap();

    engine.start_drag(child);
    engine.tick(1.0 / 60.0);
    engine.update_drag(child, anchor + Position::new(0.0, 0.5, 0.0));
    engine.tick(1.0 / 60.0);
    // A fast flick leaves velocity behind
    engine.update_drag(child, anchor + Position::new(0.0, 1.0, 0.0));
    engine.end_drag(child);
    let drop = engine.anchor(child).unwrap();
    assert!(engine.body(child).unwrap().velocity().norm() > 1.0);

    engine.tick(1.0 / 60.0);
    assert_ne!(engine.live_position(child), Some(drop));

    run(&mut engine, 5.0);
    assert!(engine.body(child).unwrap().is_settled());
    assert_eq!(engine.live_position(child), Some(drop));
}

#[test]
fn test_settled_bodies_drift_near_anchor() {
    let (graph, parent, _) = family();
    let config = PhysicsConfig::default();
    let bound = config.drift_amplitude * 3f64.sqrt() + 1e-9;
    let mut engine = PhysicsEngine::new(config);
    engine.sync_anchors(&layout_of(&graph));

    let anchor = engine.anchor(parent).unwrap();
    let mut moved = false;
    for _ in 0..600 {
        engine.tick(1.0 / 60.0);
        let live = engine.live_position(parent).unwrap();
        assert!((live - anchor).norm() <= bound);
        moved |= live != anchor;
    }
    assert!(moved);
}

#[test]
fn test_same_seed_same_motion() {
    let (graph, _, _) = family();
    let layout = layout_of(&graph);
    let mut a = PhysicsEngine::new(PhysicsConfig::default());
    let mut b = PhysicsEngine::new(PhysicsConfig::default());
    a.sync_anchors(&layout);
    b.sync_anchors(&layout);
    run(&mut a, 2.0);
    run(&mut b, 2.0);
    assert_eq!(
        a.live_positions().collect::<Vec<_>>(),
        b.live_positions().collect::<Vec<_>>()
    );
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point() -> impl Strategy<Value = Position> {
        (-50.0f64..50.0, -50.0f64..50.0, -50.0f64..50.0).prop_map(|(x, y, z)| Position::new(x, y, z))
    }

    proptest! {
        #[test]
        fn prop_drag_stays_within_radius(targets in prop::collection::vec(point(), 1..20)) {
            let (graph, _, child) = family();
            let config = PhysicsConfig::still();
            let radius = config.max_drag_radius;
            let mut engine = PhysicsEngine::new(config);
            engine.sync_anchors(&layout_of(&graph));
            let anchor = engine.anchor(child).unwrap();

            engine.start_drag(child);
            for target in targets {
                engine.tick(1.0 / 60.0);
                prop_assert!(engine.update_drag(child, target));
                let live = engine.live_position(child).unwrap();
                prop_assert!((live - anchor).norm() <= radius + 1e-9);
            }
            engine.end_drag(child);

            let drop = engine.anchor(child).unwrap();
            for _ in 0..120 {
                engine.tick(1.0 / 60.0);
                let live = engine.live_position(child).unwrap();
                prop_assert!((live - drop).norm() <= radius + 1e-9);
            }
        }
    }
}
