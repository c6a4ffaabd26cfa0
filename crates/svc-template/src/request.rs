//! Provisioning-request template resource
//!
//! Minted when a catalog item is created from a source VM. Owned
//! exclusively by its parent template and destroyed together with it.

use serde::{Deserialize, Serialize};
use svc_graph::{RequestId, VmId};

/// Request template carrying the requester and resolved source id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTemplate {
    /// Store-minted identifier
    pub id: RequestId,
    /// Userid of the requester the item was created for
    pub requester: String,
    /// Source VM the provisioning request clones from
    pub src_vm_id: VmId,
}

impl RequestTemplate {
    /// Create a request template
    #[inline]
    #[must_use]
    pub fn new(id: RequestId, requester: impl Into<String>, src_vm_id: VmId) -> Self {
        Self {
            id,
            requester: requester.into(),
            src_vm_id,
        }
    }

    /// Point the request at a different source VM, in place
    ///
    /// Used by catalog-item update so the existing edge is preserved
    /// and no cycle re-check is needed.
    pub fn retarget(&mut self, src_vm_id: VmId) {
        self.src_vm_id = src_vm_id;
    }
}
