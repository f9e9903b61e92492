//! Integration tests for graph construction and traversal queries.

use kin_core::graph::FamilyGraph;
use kin_core::model::{Person, PersonId, Relationship};
use kin_core::paths::{edge_indices, shortest_path};
use kin_core::{KinshipError, lca};
use std::collections::BTreeSet;

fn persons(ids: &[PersonId]) -> Vec<Person> {
    ids.iter()
        .map(|&id| Person::named(id, format!("P{}", id), "Test"))
        .collect()
}

/// Three generations plus an in-law:
///
/// ```text
///        1 ──spouse──> 2
///      /   \          /  \
///     3     4 <──────    (2 is also a parent of 4)
///     |     |
///     5     6 ──spouse──> 7
///           |
///           8
/// ```
fn make_test_graph() -> FamilyGraph {
    let rels = vec![
        Relationship::spouse(1, 1, 2),
        Relationship::parent(2, 1, 3),
        Relationship::parent(3, 1, 4),
        Relationship::parent(4, 2, 4),
        Relationship::parent(5, 3, 5),
        Relationship::parent(6, 4, 6),
        Relationship::spouse(7, 6, 7),
        Relationship::parent(8, 6, 8),
    ];
    FamilyGraph::new(&persons(&[1, 2, 3, 4, 5, 6, 7, 8]), &rels).unwrap()
}

#[test]
fn test_construction_counts() {
    let graph = make_test_graph();
    assert_eq!(graph.len(), 8);
    assert_eq!(graph.edge_count(), 8);
    assert_eq!(graph.person(5).unwrap().display_name(), "P5 Test");
}

#[test]
fn test_duplicate_person_id() {
    let err = FamilyGraph::new(&persons(&[1, 2, 1]), &[]).unwrap_err();
    assert_eq!(err, KinshipError::DuplicatePersonId(1));
}

#[test]
fn test_unknown_person_reference() {
    let result = FamilyGraph::new(&persons(&[1, 2]), &[Relationship::parent(10, 1, 99)]);
    assert_eq!(
        result.unwrap_err(),
        KinshipError::UnknownPersonReference {
            relationship_id: 10,
            person_id: 99,
        }
    );
}

#[test]
fn test_cyclic_ancestry_rejected() {
    let rels = vec![
        Relationship::parent(1, 1, 2),
        Relationship::parent(2, 2, 3),
        Relationship::parent(3, 3, 1),
    ];
    match FamilyGraph::new(&persons(&[1, 2, 3]), &rels) {
        Err(KinshipError::CyclicAncestry { cycle }) => {
            assert_eq!(cycle, vec![1, 2, 3]);
        }
        other => panic!("expected CyclicAncestry, got {:?}", other),
    }
}

#[test]
fn test_graph_owns_its_copy() {
    let mut people = persons(&[1, 2]);
    let graph = FamilyGraph::new(&people, &[Relationship::parent(1, 1, 2)]).unwrap();
    people[0].first_name = Some("Changed".into());
    assert_eq!(graph.person(1).unwrap().first_name.as_deref(), Some("P1"));
}

#[test]
fn test_ancestors_and_descendants() {
    let graph = make_test_graph();
    assert_eq!(graph.ancestors(8).unwrap(), BTreeSet::from([1, 2, 4, 6]));
    assert_eq!(graph.descendants(4).unwrap(), BTreeSet::from([6, 7, 8]));
    // Spouse edges take part in reachability.
    assert_eq!(graph.ancestors(7).unwrap(), BTreeSet::from([1, 2, 4, 6]));
    assert!(graph.ancestors(1).unwrap().is_empty());
}

#[test]
fn test_ancestors_descendants_disjoint() {
    let graph = make_test_graph();
    for person in graph.persons() {
        let id = person.person_id;
        let up = graph.ancestors(id).unwrap();
        let down = graph.descendants(id).unwrap();
        assert!(!up.contains(&id));
        assert!(!down.contains(&id));
        assert!(up.is_disjoint(&down), "overlap for {}", id);
    }
}

#[test]
fn test_unknown_node_queries() {
    let graph = make_test_graph();
    assert_eq!(graph.ancestors(42), Err(KinshipError::UnknownNode(42)));
    assert_eq!(graph.descendants(42), Err(KinshipError::UnknownNode(42)));
    assert!(graph.subtree(42).is_err());
}

#[test]
fn test_lca_symmetric_and_reflexive() {
    let graph = make_test_graph();
    let ids: Vec<PersonId> = graph.persons().map(|p| p.person_id).collect();
    for &a in &ids {
        assert_eq!(lca::lowest_common_ancestor(&graph, a, a).unwrap(), a);
        for &b in &ids {
            let ab = lca::lowest_common_ancestor(&graph, a, b);
            let ba = lca::lowest_common_ancestor(&graph, b, a);
            match (ab, ba) {
                (Ok(x), Ok(y)) => assert_eq!(x, y, "lca({}, {})", a, b),
                (Err(_), Err(_)) => {}
                (x, y) => panic!("asymmetric lca for ({}, {}): {:?} vs {:?}", a, b, x, y),
            }
        }
    }
}

#[test]
fn test_lca_examples() {
    let graph = make_test_graph();
    assert_eq!(lca::lowest_common_ancestor(&graph, 8, 4).unwrap(), 4);
    assert_eq!(lca::lowest_common_ancestor(&graph, 5, 6).unwrap(), 1);
    assert_eq!(lca::lowest_common_ancestor(&graph, 7, 8).unwrap(), 6);
}

#[test]
fn test_lca_disconnected_lineages() {
    let rels = vec![Relationship::parent(1, 1, 2), Relationship::parent(2, 3, 4)];
    let graph = FamilyGraph::new(&persons(&[1, 2, 3, 4]), &rels).unwrap();
    assert_eq!(
        lca::lowest_common_ancestor(&graph, 2, 4),
        Err(KinshipError::NoCommonAncestor(2, 4))
    );
}

#[test]
fn test_shortest_path_reverses() {
    let graph = make_test_graph();
    let forward = shortest_path(&graph, 5, 8).unwrap();
    let backward = shortest_path(&graph, 8, 5).unwrap();
    let flipped: Vec<_> = forward.iter().rev().map(|&(a, b)| (b, a)).collect();
    assert_eq!(backward, flipped);
    assert_eq!(forward, vec![(5, 3), (3, 1), (1, 4), (4, 6), (6, 8)]);
}

#[test]
fn test_path_avoids_spouse_shortcut() {
    let graph = make_test_graph();
    // Routed through the common ancestor 6, never across unrelated edges.
    assert_eq!(shortest_path(&graph, 7, 8).unwrap(), vec![(7, 6), (6, 8)]);
}

#[test]
fn test_edge_indices_for_path() {
    let graph = make_test_graph();
    let path = shortest_path(&graph, 7, 8).unwrap();
    let indices = edge_indices(&graph, &path);
    let endpoints: Vec<_> = indices
        .iter()
        .map(|&i| graph.edges()[i].endpoints())
        .collect();
    assert_eq!(endpoints, vec![(6, 7), (6, 8)]);
}

#[test]
fn test_subtree_induced() {
    let graph = make_test_graph();
    let sub = graph.subtree(4).unwrap();
    let expected: BTreeSet<PersonId> = graph
        .descendants(4)
        .unwrap()
        .into_iter()
        .chain([4])
        .collect();
    assert_eq!(sub.person_ids(), expected);
    assert_eq!(sub.root(), 4);
    assert_eq!(sub.len(), 4);
    for (_, edge) in sub.edges() {
        assert!(sub.contains(edge.from) && sub.contains(edge.to));
    }
    assert_eq!(sub.edge_count(), 3);
    // Parent graph is untouched.
    assert_eq!(graph.len(), 8);
}

#[test]
fn test_subtree_to_graph() {
    let graph = make_test_graph();
    let owned = graph.subtree(3).unwrap().to_graph();
    assert_eq!(owned.len(), 2);
    assert_eq!(owned.edge_count(), 1);
    assert_eq!(owned.descendants(3).unwrap(), BTreeSet::from([5]));
    assert!(!owned.contains(1));
}
