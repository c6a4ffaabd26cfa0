//! Identifier newtypes and the polymorphic edge target
//!
//! Resource identifiers mirror the relational source model: numeric ids
//! minted by the store, scoped per resource class. Identity comparisons
//! therefore always pair the class with the raw id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a service template node
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an externally managed VM or VM template
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VmId(pub u64);

impl fmt::Display for VmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a provisioning-request template resource
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resource class discriminant, used for identity and reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceClass {
    /// Another service template node
    ServiceTemplate,
    /// An externally managed VM
    Vm,
    /// A provisioning-request template
    Request,
}

impl ResourceClass {
    /// Class name as reported in validation messages
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ServiceTemplate => "ServiceTemplate",
            Self::Vm => "Vm",
            Self::Request => "Request",
        }
    }
}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Polymorphic edge target
///
/// A template may link to another template, to a VM, or to a
/// provisioning-request template. The variant set is closed: each
/// target only needs identity, kind classification, and validity
/// checking, so a tagged enum beats open-ended dispatch here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceRef {
    /// Child service template
    Template(NodeId),
    /// Child VM resource
    Vm(VmId),
    /// Child provisioning-request template
    Request(RequestId),
}

impl ResourceRef {
    /// Resource class of this target
    #[inline]
    #[must_use]
    pub fn class(&self) -> ResourceClass {
        match self {
            Self::Template(_) => ResourceClass::ServiceTemplate,
            Self::Vm(_) => ResourceClass::Vm,
            Self::Request(_) => ResourceClass::Request,
        }
    }

    /// Raw numeric id, only meaningful together with the class
    #[inline]
    #[must_use]
    pub fn raw_id(&self) -> u64 {
        match self {
            Self::Template(id) => id.0,
            Self::Vm(id) => id.0,
            Self::Request(id) => id.0,
        }
    }

    /// Full identity: class plus raw id
    ///
    /// Edges are unique per (parent, identity) pair. Two resources of
    /// different classes may share a raw id without colliding.
    #[inline]
    #[must_use]
    pub fn identity(&self) -> (ResourceClass, u64) {
        (self.class(), self.raw_id())
    }

    /// Whether the target is a template node
    #[inline]
    #[must_use]
    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }

    /// Node id if the target is a template
    #[inline]
    #[must_use]
    pub fn template_id(&self) -> Option<NodeId> {
        match self {
            Self::Template(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether the target counts as atomic for kind classification
    ///
    /// VM and request targets are atomic; template targets are
    /// composite-shaped regardless of their own current kind.
    #[inline]
    #[must_use]
    pub fn is_atomic_target(&self) -> bool {
        !self.is_template()
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.class(), self.raw_id())
    }
}

/// Computed kind of a node
///
/// Never stored authoritatively: re-derived from the edge set after
/// every mutation. See [`crate::CompositionGraph::service_type_of`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    /// No outgoing edges
    #[default]
    Unknown,
    /// Exactly one edge to an atomic target
    Atomic,
    /// More than one edge, or an edge to a composite-shaped target
    Composite,
}

impl ServiceType {
    /// Lowercase tag, matching the wire representation
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Atomic => "atomic",
            Self::Composite => "composite",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
