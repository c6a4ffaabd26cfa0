//! The service template node

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use svc_graph::{NodeId, ServiceType};

use crate::action::{ActionPhase, ResourceAction};

/// Identity ordering a catalog item or provisioning request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    /// Login id, e.g. `fred`
    pub userid: String,
    /// Current group of the requester, if any
    pub group: Option<String>,
}

impl Requester {
    /// Requester with no group
    #[inline]
    #[must_use]
    pub fn new(userid: impl Into<String>) -> Self {
        Self {
            userid: userid.into(),
            group: None,
        }
    }

    /// Requester with a current group
    #[inline]
    #[must_use]
    pub fn with_group(userid: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            userid: userid.into(),
            group: Some(group.into()),
        }
    }
}

/// Ownership reference stored on a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ownership {
    /// Owning user
    pub owner: String,
    /// Owning group, taken from the user's current group
    pub group: Option<String>,
}

/// A service template node in the composition graph
///
/// `service_type` is re-derived from the edge set by the store after
/// every edge mutation; `prov_type` and `service_type` are immutable
/// through catalog-item update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceTemplate {
    /// Store-minted identifier
    pub id: NodeId,
    /// Globally unique id, assigned at construction
    pub guid: Uuid,
    pub name: String,
    pub description: String,
    /// Whether the item is displayed in the catalog
    pub display: bool,
    /// Computed kind tag
    pub service_type: ServiceType,
    /// Provisioning-type tag, immutable after creation
    pub prov_type: String,
    /// Subtype, defaulted only for the generic prov type
    pub generic_subtype: Option<String>,
    pub ownership: Option<Ownership>,
    /// Lifecycle actions, at most one per phase, insertion ordered
    pub resource_actions: Vec<ResourceAction>,
    /// Request dialog the provisioning workflow renders, by name
    pub request_dialog_name: Option<String>,
    /// Free-form config payload carried through catalog-item create
    pub extras: IndexMap<String, Value>,
}

impl ServiceTemplate {
    /// Create an empty template with a fresh guid
    #[must_use]
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            guid: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            display: true,
            service_type: ServiceType::Unknown,
            prov_type: "unknown".to_string(),
            generic_subtype: None,
            ownership: None,
            resource_actions: Vec::new(),
            request_dialog_name: None,
            extras: IndexMap::new(),
        }
    }

    /// Set the description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the display flag
    #[inline]
    #[must_use]
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Set the provisioning-type tag
    #[inline]
    #[must_use]
    pub fn with_prov_type(mut self, prov_type: impl Into<String>) -> Self {
        self.prov_type = prov_type.into();
        self
    }

    /// Set the generic subtype
    #[inline]
    #[must_use]
    pub fn with_generic_subtype(mut self, subtype: Option<String>) -> Self {
        self.generic_subtype = subtype;
        self
    }

    /// Whether the template is atomic
    #[inline]
    #[must_use]
    pub fn atomic(&self) -> bool {
        self.service_type == ServiceType::Atomic
    }

    /// Whether the template is composite
    #[inline]
    #[must_use]
    pub fn composite(&self) -> bool {
        self.service_type == ServiceType::Composite
    }

    /// Catalog display label for the kind
    #[must_use]
    pub fn type_display(&self) -> &'static str {
        match self.service_type {
            ServiceType::Unknown => "Unknown",
            ServiceType::Atomic => "Item",
            ServiceType::Composite => "Bundle",
        }
    }

    /// Action defined for a phase, if any
    #[must_use]
    pub fn action(&self, phase: ActionPhase) -> Option<&ResourceAction> {
        self.resource_actions.iter().find(|a| a.phase == phase)
    }

    /// Mutable action for a phase
    pub fn action_mut(&mut self, phase: ActionPhase) -> Option<&mut ResourceAction> {
        self.resource_actions.iter_mut().find(|a| a.phase == phase)
    }

    /// First provision action, used by the dispatcher
    #[inline]
    #[must_use]
    pub fn provision_action(&self) -> Option<&ResourceAction> {
        self.action(ActionPhase::Provision)
    }

    /// Add or replace the action for its phase
    pub fn upsert_action(&mut self, action: ResourceAction) {
        match self.action_mut(action.phase) {
            Some(existing) => *existing = action,
            None => self.resource_actions.push(action),
        }
    }

    /// Remove the action for a phase; safe when absent
    pub fn remove_action(&mut self, phase: ActionPhase) {
        self.resource_actions.retain(|a| a.phase != phase);
    }

    /// Assign ownership from a user; a missing user is a no-op
    pub fn set_ownership(&mut self, user: Option<&Requester>) {
        if let Some(user) = user {
            self.ownership = Some(Ownership {
                owner: user.userid.clone(),
                group: user.group.clone(),
            });
        }
    }
}
