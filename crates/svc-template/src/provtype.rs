//! Provisioning-type registry
//!
//! Maps a provisioning-type tag to its behavior bundle, replacing
//! subtype resolution by class hierarchy. Resolution happens once at
//! node construction; unregistered tags fall back to the non-generic
//! default bundle.

use std::collections::HashMap;

/// The provisioning-type tag that triggers subtype defaulting
pub const GENERIC_PROV_TYPE: &str = "generic";

/// Behavior bundle for one provisioning type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvTypeBehavior {
    /// Whether the type belongs to the generic family
    pub generic: bool,
    /// Subtype applied when the payload supplies none
    pub default_subtype: Option<String>,
}

impl ProvTypeBehavior {
    /// Non-generic bundle with no defaults
    #[inline]
    #[must_use]
    pub fn standard() -> Self {
        Self {
            generic: false,
            default_subtype: None,
        }
    }
}

impl Default for ProvTypeBehavior {
    fn default() -> Self {
        Self::standard()
    }
}

/// Registry of provisioning-type behavior bundles
#[derive(Debug, Clone, Default)]
pub struct ProvTypeRegistry {
    bundles: HashMap<String, ProvTypeBehavior>,
}

impl ProvTypeRegistry {
    /// Create an empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in generic bundle
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(
            GENERIC_PROV_TYPE,
            ProvTypeBehavior {
                generic: true,
                default_subtype: Some("custom".to_string()),
            },
        );
        registry
    }

    /// Register a behavior bundle for a tag
    pub fn register(&mut self, prov_type: &str, behavior: ProvTypeBehavior) {
        self.bundles.insert(prov_type.to_string(), behavior);
    }

    /// Resolve a tag, falling back to the standard bundle
    #[must_use]
    pub fn resolve(&self, prov_type: &str) -> ProvTypeBehavior {
        self.bundles
            .get(prov_type)
            .cloned()
            .unwrap_or_else(ProvTypeBehavior::standard)
    }

    /// Subtype for a new node: the requested value, or the bundle
    /// default. Non-generic types never receive a default.
    #[must_use]
    pub fn subtype_for(&self, prov_type: &str, requested: Option<String>) -> Option<String> {
        requested.or_else(|| self.resolve(prov_type).default_subtype)
    }
}
