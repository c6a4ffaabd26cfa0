//! Provisioning dispatcher
//!
//! Launches a provisioning workflow from a resolved template and creates
//! runtime service instances from provisioning tasks.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use svc_graph::NodeId;
use svc_template::{Requester, ServiceTemplate};

use crate::collaborators::{RequestContext, Workflow, WorkflowFactory};
use crate::error::CatalogError;

/// Initiator tag used when the caller supplies none
pub const DEFAULT_INITIATOR: &str = "user";

/// Free-form options accepted by [`ProvisioningDispatcher::provision_request`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Who the request is ordered on behalf of
    pub ordered_by: Option<String>,
    /// Initiator tag, e.g. `control`; defaults to `user`
    pub initiator: Option<String>,
}

impl ProvisionOptions {
    /// Empty options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `ordered_by`
    #[inline]
    #[must_use]
    pub fn ordered_by(mut self, who: impl Into<String>) -> Self {
        self.ordered_by = Some(who.into());
        self
    }

    /// Set the initiator
    #[inline]
    #[must_use]
    pub fn initiator(mut self, tag: impl Into<String>) -> Self {
        self.initiator = Some(tag.into());
        self
    }
}

/// A runtime service instance created from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceInstance {
    pub guid: Uuid,
    pub name: String,
    /// Template the instance was created from
    pub template_id: NodeId,
    /// Initiator recorded from the task options
    pub initiator: String,
}

/// A provisioning task carrying options and registered resources
#[derive(Debug, Clone, Default)]
pub struct ServiceTask {
    /// Free-form task options; the `initiator` key is recognized
    pub options: IndexMap<String, Value>,
    resources: Vec<ServiceInstance>,
}

impl ServiceTask {
    /// Task with empty options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one option
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Register a service instance as a resource of this task
    pub fn add_resource(&mut self, instance: ServiceInstance) {
        self.resources.push(instance);
    }

    /// Resources registered so far
    #[inline]
    #[must_use]
    pub fn resources(&self) -> &[ServiceInstance] {
        &self.resources
    }
}

/// Dispatcher over the external workflow collaborator
pub struct ProvisioningDispatcher<'a, F> {
    factory: &'a F,
}

impl<'a, F: WorkflowFactory> ProvisioningDispatcher<'a, F> {
    /// Dispatcher using the given workflow factory
    #[must_use]
    pub fn new(factory: &'a F) -> Self {
        Self { factory }
    }

    /// Build and submit one provisioning workflow for a template
    ///
    /// Resolves the template's provision action, constructs the workflow
    /// with empty base options and an invocation context of target plus
    /// initiator, sets `ordered_by`/`initiator` when supplied, and
    /// submits exactly once. Submission failures propagate unchanged;
    /// there is no retry at this layer.
    pub fn provision_request(
        &self,
        template: &ServiceTemplate,
        requester: &Requester,
        options: &ProvisionOptions,
    ) -> Result<F::Workflow, CatalogError> {
        let action = template
            .provision_action()
            .ok_or(CatalogError::NoProvisionAction(template.id))?;

        let initiator = options
            .initiator
            .clone()
            .unwrap_or_else(|| DEFAULT_INITIATOR.to_string());
        let context = RequestContext {
            target: template.id,
            initiator,
        };

        let mut workflow =
            self.factory
                .new_workflow(IndexMap::new(), requester, action, context);
        if let Some(ordered_by) = &options.ordered_by {
            workflow.set_value("ordered_by", Value::String(ordered_by.clone()));
        }
        if let Some(initiator) = &options.initiator {
            workflow.set_value("initiator", Value::String(initiator.clone()));
        }

        workflow.submit_request()?;
        info!(template = %template.id, requester = %requester.userid, "submitted provision request");
        Ok(workflow)
    }
}

/// Create a runtime service instance from a template and task
///
/// The initiator is read from the task options' `initiator` key,
/// defaulting to `user`. With a parent task the instance is registered
/// as its resource exactly once; without one, no registration happens.
#[must_use]
pub fn create_service(
    template: &ServiceTemplate,
    task: &ServiceTask,
    parent_task: Option<&mut ServiceTask>,
) -> ServiceInstance {
    let initiator = task
        .options
        .get("initiator")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_INITIATOR)
        .to_string();

    let instance = ServiceInstance {
        guid: Uuid::new_v4(),
        name: template.name.clone(),
        template_id: template.id,
        initiator,
    };

    if let Some(parent) = parent_task {
        parent.add_resource(instance.clone());
        debug!(template = %template.id, "registered instance with parent task");
    }
    instance
}
