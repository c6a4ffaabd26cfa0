//! Service Template Composition Graph
//!
//! Directed resource links between service templates and the external
//! resources they provision (VMs, provisioning-request templates).
//!
//! # Core Concepts
//!
//! - [`CompositionGraph`]: adjacency-list store for nodes and resource edges
//! - [`ResourceRef`]: tagged reference to an edge target (template, VM, request)
//! - [`ServiceType`]: computed kind of a node (unknown, atomic, composite)
//! - [`guard::would_cycle`]: the check that keeps the template subgraph acyclic
//!
//! # Example
//!
//! ```rust,ignore
//! use svc_graph::{CompositionGraph, NodeId, ResourceRef};
//!
//! let mut graph = CompositionGraph::new();
//! let parent = NodeId(1);
//! let child = NodeId(2);
//! graph.add_node(parent);
//! graph.add_node(child);
//!
//! graph.add_edge(parent, ResourceRef::Template(child))?;
//! assert_eq!(graph.children(parent).len(), 1);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod error;
mod graph;
mod ids;

/// Cycle prevention for the template subgraph
pub mod guard;

// Re-exports
pub use error::GraphError;
pub use graph::CompositionGraph;
pub use ids::{NodeId, RequestId, ResourceClass, ResourceRef, ServiceType, VmId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
