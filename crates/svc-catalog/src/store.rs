//! In-memory template store
//!
//! Implements the persistence contract the core assumes: synchronous
//! CRUD, id minting, child/parent lookup. Callers hold `&mut` access for
//! the duration of one operation, which gives the cycle guard a
//! consistent snapshot of the graph per `add_resource` call.

use std::collections::HashMap;

use tracing::debug;

use svc_graph::{CompositionGraph, GraphError, NodeId, RequestId, ResourceRef, VmId};
use svc_template::{RequestTemplate, ServiceTemplate};

use crate::config::{ConfigInfo, PhaseConfig};

/// Store of templates, request-template resources, and the graph
#[derive(Debug, Default)]
pub struct TemplateStore {
    graph: CompositionGraph,
    templates: HashMap<NodeId, ServiceTemplate>,
    requests: HashMap<RequestId, RequestTemplate>,
    next_node_id: u64,
    next_request_id: u64,
}

impl TemplateStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the underlying graph
    #[inline]
    #[must_use]
    pub fn graph(&self) -> &CompositionGraph {
        &self.graph
    }

    /// Mint an id and insert the template the builder produces for it
    pub fn insert_template(
        &mut self,
        build: impl FnOnce(NodeId) -> ServiceTemplate,
    ) -> NodeId {
        self.next_node_id += 1;
        let id = NodeId(self.next_node_id);
        let template = build(id);
        self.graph.add_node(id);
        self.templates.insert(id, template);
        id
    }

    /// Mint and store a request template resource
    pub fn insert_request(&mut self, requester: &str, src_vm_id: VmId) -> RequestId {
        self.next_request_id += 1;
        let id = RequestId(self.next_request_id);
        self.requests
            .insert(id, RequestTemplate::new(id, requester, src_vm_id));
        id
    }

    /// Template by id
    #[must_use]
    pub fn template(&self, id: NodeId) -> Option<&ServiceTemplate> {
        self.templates.get(&id)
    }

    /// Mutable template by id
    pub fn template_mut(&mut self, id: NodeId) -> Option<&mut ServiceTemplate> {
        self.templates.get_mut(&id)
    }

    /// Request template by id
    #[must_use]
    pub fn request(&self, id: RequestId) -> Option<&RequestTemplate> {
        self.requests.get(&id)
    }

    /// Mutable request template by id
    pub fn request_mut(&mut self, id: RequestId) -> Option<&mut RequestTemplate> {
        self.requests.get_mut(&id)
    }

    /// Remove a request template row
    ///
    /// Edges pointing at it are left in place; validation reports them
    /// as missing service resources.
    pub fn remove_request(&mut self, id: RequestId) -> Option<RequestTemplate> {
        self.requests.remove(&id)
    }

    /// Add a resource edge and recompute the parent's kind
    ///
    /// The cycle guard runs inside the graph before anything commits.
    pub fn add_resource(&mut self, parent: NodeId, child: ResourceRef) -> Result<(), GraphError> {
        self.graph.add_edge(parent, child)?;
        self.refresh_service_type(parent);
        debug!(%parent, %child, "added service resource");
        Ok(())
    }

    /// Remove a resource edge and recompute the parent's kind
    pub fn remove_resource(&mut self, parent: NodeId, child: ResourceRef) {
        self.graph.remove_edge(parent, child);
        self.refresh_service_type(parent);
    }

    /// Direct children of a template, raw order
    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<ResourceRef> {
        self.graph.children(id)
    }

    /// Transitive template descendants, duplicates preserved
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.graph.descendants(id)
    }

    /// Parent templates holding an edge into `id`
    #[must_use]
    pub fn parent_services(&self, id: NodeId) -> Vec<NodeId> {
        self.graph.parents(id)
    }

    /// First request-template child of a template, if any
    #[must_use]
    pub fn request_child(&self, id: NodeId) -> Option<RequestId> {
        self.graph.children(id).iter().find_map(|child| match child {
            ResourceRef::Request(rid) => Some(*rid),
            _ => None,
        })
    }

    /// Delete a template, its outgoing edges, and its owned requests
    ///
    /// Fails with [`GraphError::HasParent`] while the template is some
    /// other node's child; nothing is removed in that case.
    pub fn delete_template(&mut self, id: NodeId) -> Result<(), GraphError> {
        let removed = self.graph.delete(id)?;
        for child in removed {
            if let ResourceRef::Request(rid) = child {
                // Request templates are owned exclusively by their parent
                self.requests.remove(&rid);
            }
        }
        self.templates.remove(&id);
        debug!(template = %id, "deleted service template");
        Ok(())
    }

    /// Recompute and persist the kind of a node from its edges
    pub fn refresh_service_type(&mut self, id: NodeId) {
        let service_type = self.graph.service_type_of(id);
        if let Some(template) = self.templates.get_mut(&id) {
            template.service_type = service_type;
        }
    }

    /// Canonical config-info read-back for a template
    ///
    /// Rebuilt from current action state, the owned request template,
    /// and stored extras; `None` when the template does not exist.
    #[must_use]
    pub fn config_info(&self, id: NodeId) -> Option<ConfigInfo> {
        let template = self.templates.get(&id)?;

        let mut info = ConfigInfo {
            request_dialog_name: template.request_dialog_name.clone(),
            src_vm_id: None,
            phases: template
                .resource_actions
                .iter()
                .map(|action| {
                    (
                        action.phase,
                        PhaseConfig {
                            fqname: action.fqname.clone(),
                            dialog_id: action.dialog_id,
                        },
                    )
                })
                .collect(),
            extras: template.extras.clone(),
        };

        if let Some(rid) = self.request_child(id) {
            info.src_vm_id = self.requests.get(&rid).map(|r| r.src_vm_id);
        }

        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svc_graph::ServiceType;
    use svc_template::{ActionPhase, ResourceAction};

    fn store_with_template(name: &str) -> (TemplateStore, NodeId) {
        let mut store = TemplateStore::new();
        let id = store.insert_template(|id| ServiceTemplate::new(id, name));
        (store, id)
    }

    #[test]
    fn minted_ids_are_sequential_and_distinct() {
        let mut store = TemplateStore::new();
        let a = store.insert_template(|id| ServiceTemplate::new(id, "a"));
        let b = store.insert_template(|id| ServiceTemplate::new(id, "b"));
        assert_ne!(a, b);
        assert_ne!(
            store.template(a).unwrap().guid,
            store.template(b).unwrap().guid
        );
    }

    #[test]
    fn add_resource_updates_stored_kind() {
        let (mut store, id) = store_with_template("svc");
        assert_eq!(store.template(id).unwrap().service_type, ServiceType::Unknown);

        let rid = store.insert_request("fred", VmId(9));
        store.add_resource(id, ResourceRef::Request(rid)).unwrap();
        assert_eq!(store.template(id).unwrap().service_type, ServiceType::Atomic);

        store.remove_resource(id, ResourceRef::Request(rid));
        assert_eq!(store.template(id).unwrap().service_type, ServiceType::Unknown);
    }

    #[test]
    fn delete_destroys_owned_request() {
        let (mut store, id) = store_with_template("svc");
        let rid = store.insert_request("fred", VmId(9));
        store.add_resource(id, ResourceRef::Request(rid)).unwrap();

        store.delete_template(id).unwrap();
        assert!(store.template(id).is_none());
        assert!(store.request(rid).is_none());
    }

    #[test]
    fn delete_child_fails_and_keeps_state() {
        let (mut store, parent) = store_with_template("parent");
        let child = store.insert_template(|id| ServiceTemplate::new(id, "child"));
        store
            .add_resource(parent, ResourceRef::Template(child))
            .unwrap();

        let err = store.delete_template(child).unwrap_err();
        assert_eq!(err, GraphError::HasParent { node: child });
        assert!(store.template(child).is_some());
    }

    #[test]
    fn config_info_reflects_actions_and_request() {
        let (mut store, id) = store_with_template("svc");
        let rid = store.insert_request("fred", VmId(42));
        store.add_resource(id, ResourceRef::Request(rid)).unwrap();
        store
            .template_mut(id)
            .unwrap()
            .upsert_action(ResourceAction::new(ActionPhase::Provision, "/a/b/c", None));

        let info = store.config_info(id).unwrap();
        assert_eq!(info.src_vm_id, Some(VmId(42)));
        assert_eq!(info.phases[&ActionPhase::Provision].fqname, "/a/b/c");
    }
}
