//! Service Template Catalog Core
//!
//! Turns flat catalog-item configuration payloads into validated service
//! templates, keeps the composition graph structurally sound, and
//! launches provisioning workflows from resolved templates.
//!
//! # Core Concepts
//!
//! - [`TemplateStore`]: in-memory persistence for templates, requests, and the graph
//! - [`CatalogItemManager`]: create/update/delete of catalog items with delta reconciliation
//! - [`TemplateValidator`]: structural and referential health of a template's resources
//! - [`ProvisioningDispatcher`]: workflow construction and submission
//! - [`collaborators`]: contracts for the external registry, resolver, and workflow engine
//!
//! # Example
//!
//! ```rust,ignore
//! use svc_catalog::{CatalogItemManager, CatalogItemConfig, ConfigInfo, TemplateStore};
//! use svc_template::{ActionPhase, Requester};
//!
//! let mut store = TemplateStore::new();
//! let mut manager = CatalogItemManager::new(&mut store, &registry);
//!
//! let config = CatalogItemConfig::named("web tier")
//!     .with_prov_type("amazon")
//!     .with_config_info(ConfigInfo::new().with_phase(ActionPhase::Provision, "/a/b/c", None));
//! let template = manager.create_catalog_item(config, &Requester::new("fred"))?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod collaborators;
mod config;
mod dispatch;
mod error;
mod lifecycle;
mod store;
mod validator;

// Re-exports
pub use collaborators::{
    ActionDescriptor, ActionDialogRegistry, DialogRef, RequestContext, ResourceResolver,
    ResourceStatus, Workflow, WorkflowFactory,
};
pub use config::{CatalogItemConfig, ConfigInfo, PhaseConfig};
pub use dispatch::{
    create_service, ProvisionOptions, ProvisioningDispatcher, ServiceInstance, ServiceTask,
    DEFAULT_INITIATOR,
};
pub use error::{CatalogError, WorkflowError};
pub use lifecycle::CatalogItemManager;
pub use store::TemplateStore;
pub use validator::{TemplateValidator, ValidationReport};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the catalog core
    pub use crate::{
        CatalogItemConfig, CatalogItemManager, ConfigInfo, ProvisionOptions,
        ProvisioningDispatcher, TemplateStore, TemplateValidator,
    };
    pub use svc_graph::{NodeId, ResourceRef, ServiceType};
    pub use svc_template::{ActionPhase, Requester, ServiceTemplate};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
