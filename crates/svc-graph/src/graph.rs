//! Adjacency-list composition graph store
//!
//! Nodes are service templates; edges point at [`ResourceRef`] targets.
//! The store keeps a forward adjacency list (by parent, insertion
//! ordered) and a reverse index (by child identity) so traversal and
//! parent lookup are both near-O(1) per hop.

use std::collections::{BTreeSet, HashMap};

use crate::error::GraphError;
use crate::guard;
use crate::ids::{NodeId, ResourceClass, ResourceRef, ServiceType};

/// Mutable composition graph of templates and their resources
///
/// Invariant: the subgraph restricted to template-to-template edges is
/// acyclic at all times, including self-loops. [`Self::add_edge`]
/// enforces this through [`guard::would_cycle`] before committing.
#[derive(Debug, Default, Clone)]
pub struct CompositionGraph {
    nodes: BTreeSet<NodeId>,
    out: HashMap<NodeId, Vec<ResourceRef>>,
    incoming: HashMap<(ResourceClass, u64), Vec<NodeId>>,
}

impl CompositionGraph {
    /// Create an empty graph
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node; idempotent
    pub fn add_node(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    /// Whether a node is registered
    #[inline]
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// All registered node ids, ascending
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        self.nodes.iter().copied().collect()
    }

    /// Number of registered nodes
    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges across all parents
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.out.values().map(Vec::len).sum()
    }

    /// Add a resource edge from `parent` to `child`
    ///
    /// Template children are checked by the cycle guard first; on
    /// rejection a [`GraphError::CircularReference`] is raised and no
    /// state changes. Re-adding an existing (parent, child-identity)
    /// pair is a no-op.
    pub fn add_edge(&mut self, parent: NodeId, child: ResourceRef) -> Result<(), GraphError> {
        if !self.nodes.contains(&parent) {
            return Err(GraphError::NodeNotFound(parent));
        }

        if let Some(child_node) = child.template_id() {
            if !self.nodes.contains(&child_node) {
                return Err(GraphError::NodeNotFound(child_node));
            }
            if guard::would_cycle(self, parent, child_node) {
                return Err(GraphError::CircularReference {
                    parent,
                    child: child_node,
                });
            }
        }

        let edges = self.out.entry(parent).or_default();
        if edges.iter().any(|e| e.identity() == child.identity()) {
            return Ok(());
        }
        edges.push(child);
        self.incoming.entry(child.identity()).or_default().push(parent);
        Ok(())
    }

    /// Remove the edge from `parent` to `child`; safe to call when absent
    pub fn remove_edge(&mut self, parent: NodeId, child: ResourceRef) {
        if let Some(edges) = self.out.get_mut(&parent) {
            edges.retain(|e| e.identity() != child.identity());
        }
        if let Some(parents) = self.incoming.get_mut(&child.identity()) {
            if let Some(pos) = parents.iter().position(|p| *p == parent) {
                parents.remove(pos);
            }
            if parents.is_empty() {
                self.incoming.remove(&child.identity());
            }
        }
    }

    /// Direct children of `node`, in edge insertion order
    ///
    /// Raw sequence: callers needing uniqueness deduplicate themselves.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<ResourceRef> {
        self.out.get(&node).cloned().unwrap_or_default()
    }

    /// Direct template-shaped children only
    #[must_use]
    pub fn child_template_ids(&self, node: NodeId) -> Vec<NodeId> {
        self.out
            .get(&node)
            .map(|edges| edges.iter().filter_map(ResourceRef::template_id).collect())
            .unwrap_or_default()
    }

    /// Transitive closure over template edges, depth first
    ///
    /// A descendant reachable through multiple paths appears once per
    /// path; dedup is the caller's responsibility.
    #[must_use]
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.collect_descendants(node, &mut found);
        found
    }

    fn collect_descendants(&self, node: NodeId, found: &mut Vec<NodeId>) {
        // Terminates because the template subgraph is acyclic.
        for child in self.child_template_ids(node) {
            found.push(child);
            self.collect_descendants(child, found);
        }
    }

    /// All nodes holding an edge into `node`
    #[must_use]
    pub fn parents(&self, node: NodeId) -> Vec<NodeId> {
        self.incoming
            .get(&ResourceRef::Template(node).identity())
            .cloned()
            .unwrap_or_default()
    }

    /// Delete `node` and its outgoing edges
    ///
    /// Fails with [`GraphError::HasParent`] while any incoming edge
    /// exists; deletion never cascades upward. Returns the removed
    /// children so the caller can release exclusively owned resources.
    pub fn delete(&mut self, node: NodeId) -> Result<Vec<ResourceRef>, GraphError> {
        if !self.nodes.contains(&node) {
            return Err(GraphError::NodeNotFound(node));
        }
        if !self.parents(node).is_empty() {
            return Err(GraphError::HasParent { node });
        }

        let removed = self.out.remove(&node).unwrap_or_default();
        for child in &removed {
            if let Some(parents) = self.incoming.get_mut(&child.identity()) {
                parents.retain(|p| *p != node);
                if parents.is_empty() {
                    self.incoming.remove(&child.identity());
                }
            }
        }
        self.nodes.remove(&node);
        Ok(removed)
    }

    /// Computed kind of `node` per the edge rule
    ///
    /// Zero edges is unknown; exactly one edge to an atomic target is
    /// atomic; anything else is composite.
    #[must_use]
    pub fn service_type_of(&self, node: NodeId) -> ServiceType {
        let edges = self.children(node);
        match edges.as_slice() {
            [] => ServiceType::Unknown,
            [single] if single.is_atomic_target() => ServiceType::Atomic,
            _ => ServiceType::Composite,
        }
    }
}
