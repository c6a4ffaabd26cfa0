use svc_graph::guard::would_cycle;
use svc_graph::{CompositionGraph, GraphError, NodeId, ResourceRef};
use proptest::prelude::*;

fn build(count: u64) -> (CompositionGraph, Vec<NodeId>) {
    let mut graph = CompositionGraph::new();
    let nodes: Vec<NodeId> = (1..=count).map(NodeId).collect();
    for n in &nodes {
        graph.add_node(*n);
    }
    (graph, nodes)
}

fn link(graph: &mut CompositionGraph, parent: NodeId, child: NodeId) -> Result<(), GraphError> {
    graph.add_edge(parent, ResourceRef::Template(child))
}

/// Acyclicity check independent of the guard, for cross-validation
fn is_acyclic(graph: &CompositionGraph) -> bool {
    // Iterative DFS coloring: 0 unvisited, 1 on stack, 2 done
    use std::collections::HashMap;
    let mut color: HashMap<NodeId, u8> = HashMap::new();

    for root in graph.nodes() {
        if color.get(&root).copied().unwrap_or(0) != 0 {
            continue;
        }
        let mut stack = vec![(root, false)];
        while let Some((node, leaving)) = stack.pop() {
            if leaving {
                color.insert(node, 2);
                continue;
            }
            match color.get(&node).copied().unwrap_or(0) {
                1 => return false,
                2 => continue,
                _ => {}
            }
            color.insert(node, 1);
            stack.push((node, true));
            for child in graph.child_template_ids(node) {
                match color.get(&child).copied().unwrap_or(0) {
                    1 => return false,
                    2 => {}
                    _ => stack.push((child, false)),
                }
            }
        }
    }
    true
}

#[test]
fn rejects_circular_reference_across_five_templates() {
    // A -> B, B -> C, A -> C, C -> D, A -> E all admitted
    let (mut graph, n) = build(5);
    let (a, b, c, d, e) = (n[0], n[1], n[2], n[3], n[4]);

    link(&mut graph, a, b).unwrap();
    link(&mut graph, b, c).unwrap();
    link(&mut graph, a, c).unwrap();
    link(&mut graph, c, d).unwrap();
    link(&mut graph, a, e).unwrap();

    // Back edges must be rejected
    assert!(matches!(
        link(&mut graph, c, a),
        Err(GraphError::CircularReference { .. })
    ));
    assert!(matches!(
        link(&mut graph, d, a),
        Err(GraphError::CircularReference { .. })
    ));
    assert!(matches!(
        link(&mut graph, c, b),
        Err(GraphError::CircularReference { .. })
    ));
}

#[test]
fn rejects_deeply_nested_circular_reference() {
    // Two chains joined at the ends: a -> b -> c and d -> e -> a,
    // then c -> d would close the loop c -> d -> e -> a -> b -> c
    let (mut graph, n) = build(5);
    let (a, b, c, d, e) = (n[0], n[1], n[2], n[3], n[4]);

    link(&mut graph, a, b).unwrap();
    link(&mut graph, b, c).unwrap();
    link(&mut graph, d, e).unwrap();
    link(&mut graph, e, a).unwrap();

    let err = link(&mut graph, c, d).unwrap_err();
    assert_eq!(err, GraphError::CircularReference { parent: c, child: d });
}

#[test]
fn edge_e_to_a_then_c_to_e_is_rejected() {
    let (mut graph, n) = build(5);
    let (a, b, c, d, e) = (n[0], n[1], n[2], n[3], n[4]);

    link(&mut graph, a, b).unwrap();
    link(&mut graph, b, c).unwrap();
    link(&mut graph, a, c).unwrap();
    link(&mut graph, c, d).unwrap();
    link(&mut graph, e, a).unwrap();

    // c -> e -> a -> c
    let err = link(&mut graph, c, e).unwrap_err();
    assert_eq!(err, GraphError::CircularReference { parent: c, child: e });
}

#[test]
fn children_returns_level_one_only() {
    let (mut graph, n) = build(4);
    let (a, b, c, d) = (n[0], n[1], n[2], n[3]);

    link(&mut graph, a, b).unwrap();
    link(&mut graph, b, c).unwrap();
    link(&mut graph, a, c).unwrap();
    link(&mut graph, c, d).unwrap();

    let children = graph.children(a);
    assert_eq!(children.len(), 2);
    assert!(children.contains(&ResourceRef::Template(b)));
    assert!(children.contains(&ResourceRef::Template(c)));
    assert!(!children.contains(&ResourceRef::Template(d)));
    assert!(!children.contains(&ResourceRef::Template(a)));
}

#[test]
fn descendants_superset_of_children_with_chain_duplicates() {
    // A -> B -> C plus A -> C: three raw entries, two unique
    let (mut graph, n) = build(3);
    let (a, b, c) = (n[0], n[1], n[2]);

    link(&mut graph, a, b).unwrap();
    link(&mut graph, b, c).unwrap();
    link(&mut graph, a, c).unwrap();

    let raw = graph.descendants(a);
    assert_eq!(raw.len(), 3);
    for child in graph.child_template_ids(a) {
        assert!(raw.contains(&child));
    }

    let mut unique = raw;
    unique.sort();
    unique.dedup();
    assert_eq!(unique, vec![b, c]);
}

#[test]
fn delete_guard_follows_parentage() {
    let (mut graph, n) = build(3);
    let (a, b, c) = (n[0], n[1], n[2]);
    link(&mut graph, a, b).unwrap();
    link(&mut graph, b, c).unwrap();

    assert!(matches!(graph.delete(b), Err(GraphError::HasParent { .. })));
    assert!(matches!(graph.delete(c), Err(GraphError::HasParent { .. })));

    // Top-down deletion always succeeds
    graph.delete(a).unwrap();
    graph.delete(b).unwrap();
    graph.delete(c).unwrap();
    assert_eq!(graph.node_count(), 0);
}

#[test]
fn rejected_edge_leaves_no_partial_state() {
    let (mut graph, n) = build(2);
    link(&mut graph, n[0], n[1]).unwrap();
    let edges_before = graph.edge_count();

    assert!(link(&mut graph, n[1], n[0]).is_err());
    assert_eq!(graph.edge_count(), edges_before);
    assert!(graph.parents(n[0]).is_empty());
}

proptest! {
    /// Adding edge (p, c) is rejected iff p is reachable from c
    /// (including p == c); after any sequence of attempts the template
    /// subgraph remains acyclic.
    #[test]
    fn prop_graph_remains_acyclic(
        node_count in 1..16u64,
        attempts in proptest::collection::vec((0..16u64, 0..16u64), 0..60)
    ) {
        let (mut graph, nodes) = build(node_count);

        for (from_idx, to_idx) in attempts {
            let from = nodes[(from_idx % node_count) as usize];
            let to = nodes[(to_idx % node_count) as usize];

            let expected_reject = would_cycle(&graph, from, to);
            let outcome = link(&mut graph, from, to);

            prop_assert_eq!(outcome.is_err(), expected_reject);
            prop_assert!(is_acyclic(&graph));
        }
    }

    /// Deduplicated descendants count equals the number of distinct
    /// nodes reachable by any path.
    #[test]
    fn prop_descendants_match_reachability(
        node_count in 1..10u64,
        attempts in proptest::collection::vec((0..10u64, 0..10u64), 0..25)
    ) {
        let (mut graph, nodes) = build(node_count);
        for (from_idx, to_idx) in attempts {
            let from = nodes[(from_idx % node_count) as usize];
            let to = nodes[(to_idx % node_count) as usize];
            let _ = link(&mut graph, from, to);
        }

        for node in graph.nodes() {
            let mut unique = graph.descendants(node);
            unique.sort();
            unique.dedup();

            // Reachability via guard: x is a descendant of node iff
            // adding x -> node would close a cycle (and x != node).
            let reachable: Vec<NodeId> = graph
                .nodes()
                .into_iter()
                .filter(|x| *x != node && would_cycle(&graph, *x, node))
                .collect();

            prop_assert_eq!(unique, reachable);
        }
    }
}
