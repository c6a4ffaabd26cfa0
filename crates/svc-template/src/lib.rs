//! Service Template Data Model
//!
//! The catalog-facing shape of a service template: identity, kind tags,
//! lifecycle actions, ownership, and the provisioning-request template
//! resource it may own.
//!
//! # Core Concepts
//!
//! - [`ServiceTemplate`]: a node in the composition graph
//! - [`ResourceAction`]: one lifecycle action (provision/retirement/reconfigure)
//! - [`ProvTypeRegistry`]: provisioning-type tag → behavior bundle
//! - [`RequestTemplate`]: the request resource minted for atomic items

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod action;
mod error;
mod provtype;
mod request;
mod template;

// Re-exports
pub use action::{ActionPhase, DialogId, ResourceAction};
pub use error::TemplateError;
pub use provtype::{ProvTypeBehavior, ProvTypeRegistry, GENERIC_PROV_TYPE};
pub use request::RequestTemplate;
pub use template::{Ownership, Requester, ServiceTemplate};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
