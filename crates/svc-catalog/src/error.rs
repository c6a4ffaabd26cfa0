//! Error types for catalog operations
//!
//! Domain errors are synchronous and raised to the immediate caller.
//! Top-level operations are all-or-nothing: external lookups and
//! immutable-field checks run before the first write.

use svc_graph::{GraphError, NodeId};
use svc_template::TemplateError;

/// Main catalog error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Graph mutation rejected (circular reference, has-parent, ...)
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Template payload error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Update attempted to alter an immutable field
    #[error("{field} cannot be changed")]
    ImmutableFieldChanged {
        /// Offending field name
        field: &'static str,
    },

    /// Dialog lookup against the external registry came back empty
    #[error("dialog not found: {0}")]
    DialogNotFound(String),

    /// Action lookup against the external registry came back empty
    #[error("resource action not found: {0}")]
    ActionNotFound(String),

    /// Referenced template is not in the store
    #[error("service template not found: {0}")]
    TemplateNotFound(NodeId),

    /// Dispatch attempted with no resolvable provision action
    #[error("no provision action defined for template {0}")]
    NoProvisionAction(NodeId),

    /// Workflow submission failed; propagated unchanged, never retried
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

/// Opaque failure reported by the workflow collaborator
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct WorkflowError(pub String);
