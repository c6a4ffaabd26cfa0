//! Catalog item lifecycle manager
//!
//! Synthesizes a template plus its action/resource configuration from a
//! declarative payload (create), or computes and applies a minimal delta
//! against the persisted state (update). All external lookups and
//! immutable-field checks happen before the first write, so a failed
//! call leaves committed state untouched.

use tracing::{debug, info};

use svc_graph::{NodeId, ResourceRef};
use svc_template::{
    ProvTypeRegistry, Requester, ResourceAction, ServiceTemplate,
};

use crate::collaborators::ActionDialogRegistry;
use crate::config::{CatalogItemConfig, ConfigInfo};
use crate::error::CatalogError;
use crate::store::TemplateStore;

/// Manager for catalog-item create, update, and delete
pub struct CatalogItemManager<'a, R> {
    store: &'a mut TemplateStore,
    registry: &'a R,
    prov_types: ProvTypeRegistry,
}

impl<'a, R: ActionDialogRegistry> CatalogItemManager<'a, R> {
    /// Manager over a store and an action/dialog registry
    #[must_use]
    pub fn new(store: &'a mut TemplateStore, registry: &'a R) -> Self {
        Self {
            store,
            registry,
            prov_types: ProvTypeRegistry::with_defaults(),
        }
    }

    /// Replace the provisioning-type registry
    #[must_use]
    pub fn with_prov_types(mut self, prov_types: ProvTypeRegistry) -> Self {
        self.prov_types = prov_types;
        self
    }

    /// Create a catalog item from a declarative payload
    ///
    /// Resolves the named request dialog, mints the template, links the
    /// provisioning-request resource for a configured source VM (cycle
    /// guard runs inside the edge insert), and materializes one action
    /// per configured phase. The returned template's read-back
    /// config-info equals the payload's.
    pub fn create_catalog_item(
        &mut self,
        config: CatalogItemConfig,
        requester: &Requester,
    ) -> Result<ServiceTemplate, CatalogError> {
        // Resolve every external reference before the first write
        if let Some(info) = &config.config_info {
            self.resolve_references(info)?;
        }

        let prov_type = config.prov_type.unwrap_or_else(|| "unknown".to_string());
        let generic_subtype = self
            .prov_types
            .subtype_for(&prov_type, config.generic_subtype);

        let id = self.store.insert_template(|id| {
            let mut template = ServiceTemplate::new(id, config.name.unwrap_or_default())
                .with_description(config.description.unwrap_or_default())
                .with_display(config.display.unwrap_or(true))
                .with_prov_type(prov_type)
                .with_generic_subtype(generic_subtype);
            if let Some(service_type) = config.service_type {
                template.service_type = service_type;
            }
            template.set_ownership(Some(requester));
            template
        });

        if let Some(info) = config.config_info {
            if let Some(src_vm_id) = info.src_vm_id {
                let rid = self.store.insert_request(&requester.userid, src_vm_id);
                self.store.add_resource(id, ResourceRef::Request(rid))?;
                debug!(template = %id, request = %rid, %src_vm_id, "linked request template");
            }
            self.apply_config_info(id, info);
        }

        info!(template = %id, "created catalog item");
        Ok(self.fetch(id)?.clone())
    }

    /// Update a catalog item from a declarative payload
    ///
    /// `service_type` and `prov_type` are immutable: a changed value
    /// fails the whole call before any mutation. The action set is
    /// reconciled as a delta (add/remove/update in place); a changed
    /// source VM retargets the existing request template without
    /// touching the edge. Without a `config_info` block only scalar
    /// fields are updated.
    pub fn update_catalog_item(
        &mut self,
        id: NodeId,
        config: CatalogItemConfig,
        requester: &Requester,
    ) -> Result<ServiceTemplate, CatalogError> {
        let current = self.fetch(id)?;

        if let Some(service_type) = config.service_type {
            if service_type != current.service_type {
                return Err(CatalogError::ImmutableFieldChanged {
                    field: "service_type",
                });
            }
        }
        if let Some(prov_type) = &config.prov_type {
            if *prov_type != current.prov_type {
                return Err(CatalogError::ImmutableFieldChanged { field: "prov_type" });
            }
        }
        if let Some(info) = &config.config_info {
            self.resolve_references(info)?;
        }

        let template = self
            .store
            .template_mut(id)
            .ok_or(CatalogError::TemplateNotFound(id))?;
        if let Some(name) = config.name {
            template.name = name;
        }
        if let Some(description) = config.description {
            template.description = description;
        }
        if let Some(display) = config.display {
            template.display = display;
        }

        if let Some(info) = config.config_info {
            self.reconcile_actions(id, &info)?;
            self.reconcile_source(id, &info, requester)?;
        }

        info!(template = %id, "updated catalog item");
        Ok(self.fetch(id)?.clone())
    }

    /// Delete a catalog item
    ///
    /// Fails while the template is another template's child. Owned
    /// request-template resources are destroyed with it.
    pub fn delete_catalog_item(&mut self, id: NodeId) -> Result<(), CatalogError> {
        if self.store.template(id).is_none() {
            return Err(CatalogError::TemplateNotFound(id));
        }
        self.store.delete_template(id)?;
        info!(template = %id, "deleted catalog item");
        Ok(())
    }

    fn fetch(&self, id: NodeId) -> Result<&ServiceTemplate, CatalogError> {
        self.store
            .template(id)
            .ok_or(CatalogError::TemplateNotFound(id))
    }

    /// Verify every external reference the payload names
    fn resolve_references(&self, info: &ConfigInfo) -> Result<(), CatalogError> {
        if let Some(name) = &info.request_dialog_name {
            self.registry
                .find_dialog_by_name(name)
                .ok_or_else(|| CatalogError::DialogNotFound(name.clone()))?;
        }
        for phase_config in info.phases.values() {
            self.registry
                .find_action(&phase_config.fqname)
                .ok_or_else(|| CatalogError::ActionNotFound(phase_config.fqname.clone()))?;
            if let Some(dialog_id) = phase_config.dialog_id {
                self.registry
                    .find_dialog_by_id(dialog_id)
                    .ok_or_else(|| CatalogError::DialogNotFound(dialog_id.to_string()))?;
            }
        }
        Ok(())
    }

    /// Write action definitions, dialog name, and extras onto a fresh
    /// template (create path; no existing state to diff against)
    fn apply_config_info(&mut self, id: NodeId, info: ConfigInfo) {
        if let Some(template) = self.store.template_mut(id) {
            for (phase, phase_config) in &info.phases {
                template.upsert_action(ResourceAction::new(
                    *phase,
                    phase_config.fqname.clone(),
                    phase_config.dialog_id,
                ));
            }
            template.request_dialog_name = info.request_dialog_name;
            template.extras = info.extras;
        }
    }

    /// Diff the stored action set against the payload
    fn reconcile_actions(&mut self, id: NodeId, info: &ConfigInfo) -> Result<(), CatalogError> {
        let template = self
            .store
            .template_mut(id)
            .ok_or(CatalogError::TemplateNotFound(id))?;

        // Phases absent from the payload are removed
        template
            .resource_actions
            .retain(|action| info.phases.contains_key(&action.phase));

        // Present phases are added or updated in place; a missing
        // dialog_id clears the dialog
        for (phase, phase_config) in &info.phases {
            template.upsert_action(ResourceAction::new(
                *phase,
                phase_config.fqname.clone(),
                phase_config.dialog_id,
            ));
        }

        template.request_dialog_name = info.request_dialog_name.clone();
        template.extras = info.extras.clone();
        Ok(())
    }

    /// Retarget the owned request template at a new source VM
    ///
    /// The existing edge is preserved: replacing it would require a
    /// fresh cycle check and could orphan the old target.
    fn reconcile_source(
        &mut self,
        id: NodeId,
        info: &ConfigInfo,
        requester: &Requester,
    ) -> Result<(), CatalogError> {
        let Some(src_vm_id) = info.src_vm_id else {
            return Ok(());
        };

        match self.store.request_child(id) {
            Some(rid) => {
                if let Some(request) = self.store.request_mut(rid) {
                    request.retarget(src_vm_id);
                    debug!(template = %id, request = %rid, %src_vm_id, "retargeted request template");
                }
            }
            None => {
                let rid = self.store.insert_request(&requester.userid, src_vm_id);
                self.store.add_resource(id, ResourceRef::Request(rid))?;
            }
        }
        Ok(())
    }
}
