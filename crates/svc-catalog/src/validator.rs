//! Template validator
//!
//! Walks a template's direct resource edges and checks each target for
//! structural and referential health. Findings aggregate into one
//! composed message instead of failing fast, so a caller can report
//! every problem in a template at once.

use std::collections::HashSet;

use tracing::warn;

use svc_graph::{NodeId, ResourceClass, ResourceRef, VmId};

use crate::collaborators::{ResourceResolver, ResourceStatus};
use crate::error::CatalogError;
use crate::store::TemplateStore;

/// Aggregated validation outcome for one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    findings: Vec<String>,
}

impl ValidationReport {
    /// Whether no findings were collected
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.findings.is_empty()
    }

    /// All findings, in discovery order
    #[inline]
    #[must_use]
    pub fn findings(&self) -> &[String] {
        &self.findings
    }

    /// Composed message, `None` when valid
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        if self.findings.is_empty() {
            None
        } else {
            Some(self.findings.join(", "))
        }
    }
}

/// Validator over a store and an external resource resolver
pub struct TemplateValidator<'a, R> {
    store: &'a TemplateStore,
    resolver: &'a R,
}

impl<'a, R: ResourceResolver> TemplateValidator<'a, R> {
    /// Validator for the given store and resolver
    #[must_use]
    pub fn new(store: &'a TemplateStore, resolver: &'a R) -> Self {
        Self { store, resolver }
    }

    /// Validate one template, aggregating all findings
    ///
    /// Template-shaped children are validated recursively; dangling edge
    /// targets are reported together as missing service resources.
    pub fn validate(&self, id: NodeId) -> Result<ValidationReport, CatalogError> {
        if self.store.template(id).is_none() {
            return Err(CatalogError::TemplateNotFound(id));
        }

        let mut findings = Vec::new();
        let mut dangling: Vec<(ResourceClass, u64)> = Vec::new();
        let mut visited = HashSet::new();
        self.walk(id, &mut findings, &mut dangling, &mut visited);

        if !dangling.is_empty() {
            let listed = dangling
                .iter()
                .map(|(class, raw_id)| format!("{class}:{raw_id}"))
                .collect::<Vec<_>>()
                .join(", ");
            findings.push(format!("Missing Service Resource(s): {listed}"));
        }

        if !findings.is_empty() {
            warn!(template = %id, findings = findings.len(), "template failed validation");
        }
        Ok(ValidationReport { findings })
    }

    /// Convenience boolean form
    pub fn template_valid(&self, id: NodeId) -> Result<bool, CatalogError> {
        Ok(self.validate(id)?.is_valid())
    }

    fn walk(
        &self,
        id: NodeId,
        findings: &mut Vec<String>,
        dangling: &mut Vec<(ResourceClass, u64)>,
        visited: &mut HashSet<NodeId>,
    ) {
        if !visited.insert(id) {
            return;
        }

        for child in self.store.children(id) {
            match child {
                ResourceRef::Request(rid) => match self.store.request(rid) {
                    Some(request) => self.check_vm(request.src_vm_id, findings),
                    None => dangling.push(child.identity()),
                },
                ResourceRef::Vm(vm_id) => self.check_vm(vm_id, findings),
                ResourceRef::Template(child_id) => {
                    if self.store.template(child_id).is_some() {
                        self.walk(child_id, findings, dangling, visited);
                    } else {
                        dangling.push(child.identity());
                    }
                }
            }
        }
    }

    fn check_vm(&self, id: VmId, findings: &mut Vec<String>) {
        match self.resolver.resolve_vm(id) {
            ResourceStatus::Resolved => {}
            ResourceStatus::Missing => {
                findings.push(format!("Unable to find VM with Id [{id}]"));
            }
            ResourceStatus::Orphaned => findings.push(format!("Id <{id}> is orphaned")),
            ResourceStatus::Archived => findings.push(format!("Id <{id}> is archived")),
        }
    }
}
