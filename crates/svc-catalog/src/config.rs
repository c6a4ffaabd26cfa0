//! Declarative catalog-item configuration payloads
//!
//! [`CatalogItemConfig`] is the flat payload a caller submits;
//! [`ConfigInfo`] is the canonical key-value block read back from a
//! catalog item. The read-back value is recomputed from stored action
//! state plus extras and must round-trip the create payload.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use svc_graph::{ServiceType, VmId};
use svc_template::{ActionPhase, DialogId};

/// Per-phase action configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseConfig {
    /// Fully qualified automation entry point
    pub fqname: String,
    /// Dialog attached to the action; `None` clears it
    pub dialog_id: Option<DialogId>,
}

/// The canonical config-info block of a catalog item
///
/// `IndexMap` comparison ignores order, so two blocks are equal when
/// they carry the same phases and extras.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConfigInfo {
    /// Name of the request dialog rendered at order time
    pub request_dialog_name: Option<String>,
    /// Source VM an atomic item provisions from
    pub src_vm_id: Option<VmId>,
    /// Lifecycle phase configurations
    pub phases: IndexMap<ActionPhase, PhaseConfig>,
    /// Remaining free-form payload, carried through verbatim
    pub extras: IndexMap<String, Value>,
}

impl ConfigInfo {
    /// Empty block
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a phase configuration
    #[must_use]
    pub fn with_phase(
        mut self,
        phase: ActionPhase,
        fqname: impl Into<String>,
        dialog_id: Option<DialogId>,
    ) -> Self {
        self.phases.insert(
            phase,
            PhaseConfig {
                fqname: fqname.into(),
                dialog_id,
            },
        );
        self
    }

    /// Set the request dialog name
    #[inline]
    #[must_use]
    pub fn with_request_dialog(mut self, name: impl Into<String>) -> Self {
        self.request_dialog_name = Some(name.into());
        self
    }

    /// Set the source VM
    #[inline]
    #[must_use]
    pub fn with_src_vm(mut self, id: VmId) -> Self {
        self.src_vm_id = Some(id);
        self
    }

    /// Add a free-form extra
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extras.insert(key.into(), value);
        self
    }
}

/// Declarative payload for catalog-item create and update
///
/// On update, `None` scalar fields are left untouched; an absent
/// `config_info` leaves resource actions and the source resource alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogItemConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub display: Option<bool>,
    /// Declared kind; immutable once created
    pub service_type: Option<ServiceType>,
    /// Provisioning-type tag; immutable once created
    pub prov_type: Option<String>,
    pub generic_subtype: Option<String>,
    pub config_info: Option<ConfigInfo>,
}

impl CatalogItemConfig {
    /// Payload with only a name
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Set the description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the display flag
    #[inline]
    #[must_use]
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = Some(display);
        self
    }

    /// Set the declared service type
    #[inline]
    #[must_use]
    pub fn with_service_type(mut self, service_type: ServiceType) -> Self {
        self.service_type = Some(service_type);
        self
    }

    /// Set the provisioning type
    #[inline]
    #[must_use]
    pub fn with_prov_type(mut self, prov_type: impl Into<String>) -> Self {
        self.prov_type = Some(prov_type.into());
        self
    }

    /// Set the generic subtype
    #[inline]
    #[must_use]
    pub fn with_generic_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.generic_subtype = Some(subtype.into());
        self
    }

    /// Attach the config-info block
    #[inline]
    #[must_use]
    pub fn with_config_info(mut self, config_info: ConfigInfo) -> Self {
        self.config_info = Some(config_info);
        self
    }
}
