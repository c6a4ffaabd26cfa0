//! Error types for graph mutations

use crate::ids::NodeId;

/// Errors raised by [`crate::CompositionGraph`] operations
///
/// All mutations are all-or-nothing: a returned error means no state
/// change occurred.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Adding the edge would create a directed cycle among templates
    #[error("circular reference: linking {child} under {parent} would create a cycle")]
    CircularReference {
        /// Node the edge starts from
        parent: NodeId,
        /// Template the edge points to
        child: NodeId,
    },

    /// The node is a child of another service and cannot be deleted
    #[error("cannot delete service {node}: it is a child of another service")]
    HasParent {
        /// Node whose deletion was attempted
        node: NodeId,
    },

    /// Referenced node is not registered in the graph
    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
}
