//! Cycle Guard
//!
//! Decides whether a prospective template edge may be admitted. The
//! correct test for edge (parent → child): would `parent` become
//! reachable from `child`? If so the edge closes a cycle.

use std::collections::HashSet;

use crate::graph::CompositionGraph;
use crate::ids::NodeId;

/// True iff adding edge (parent → child) would create a cycle
///
/// Self-loops are cycles. Otherwise an iterative depth-first search
/// starts at `child` and follows existing template edges looking for
/// `parent`. The visited set keeps the check O(V+E) even when the DAG
/// has converging paths, and guarantees termination at any depth.
#[must_use]
pub fn would_cycle(graph: &CompositionGraph, parent: NodeId, child: NodeId) -> bool {
    if parent == child {
        return true;
    }

    let mut visited = HashSet::new();
    let mut stack = vec![child];

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        if node == parent {
            return true;
        }
        stack.extend(graph.child_template_ids(node));
    }

    false
}
