//! External collaborator contracts
//!
//! The catalog core never talks to a network or a database; everything
//! external arrives through these synchronous traits. Lookups return
//! `Option` for "not found"; collaborator failures surface as errors and
//! propagate without retry at this layer.

use indexmap::IndexMap;
use serde_json::Value;

use svc_graph::{NodeId, VmId};
use svc_template::{DialogId, Requester, ResourceAction};

use crate::error::WorkflowError;

/// Descriptor of an external automation action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    /// Fully qualified name the action resolves under
    pub fqname: String,
}

/// Reference to an external dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRef {
    pub id: DialogId,
    pub name: String,
}

/// Action and dialog lookup registry
pub trait ActionDialogRegistry {
    /// Action descriptor by fully qualified name
    fn find_action(&self, fqname: &str) -> Option<ActionDescriptor>;

    /// Dialog by id
    fn find_dialog_by_id(&self, id: DialogId) -> Option<DialogRef>;

    /// Dialog by name
    fn find_dialog_by_name(&self, name: &str) -> Option<DialogRef>;
}

/// Resolution status of an external VM resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    /// Present and healthy
    Resolved,
    /// Not found by id
    Missing,
    /// Present but no longer attached to its management system
    Orphaned,
    /// Present but archived
    Archived,
}

/// Resolver for externally managed resources, used by validation
pub trait ResourceResolver {
    /// Status of the VM with the given id
    fn resolve_vm(&self, id: VmId) -> ResourceStatus;
}

/// Invocation context handed to the workflow collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Template the request targets
    pub target: NodeId,
    /// Initiator tag, caller-supplied or the `user` default
    pub initiator: String,
}

/// A provisioning workflow handle
pub trait Workflow {
    /// Set a named value on the workflow before submission
    fn set_value(&mut self, key: &str, value: Value);

    /// Submit the request; called exactly once per dispatch
    fn submit_request(&mut self) -> Result<(), WorkflowError>;
}

/// Constructor for provisioning workflows
pub trait WorkflowFactory {
    /// Concrete workflow handle type
    type Workflow: Workflow;

    /// Build a workflow from base options, requester, resolved action,
    /// and invocation context
    fn new_workflow(
        &self,
        base_options: IndexMap<String, Value>,
        requester: &Requester,
        action: &ResourceAction,
        context: RequestContext,
    ) -> Self::Workflow;
}
