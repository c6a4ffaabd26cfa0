//! Lifecycle actions attached to a template
//!
//! Each template carries at most one action per lifecycle phase. An
//! action names an external automation entry point (fqname) and may
//! reference a dialog shown to the requester.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TemplateError;

/// Identifier of an externally managed dialog
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct DialogId(pub u64);

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle phase an action belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPhase {
    Provision,
    Retirement,
    Reconfigure,
}

impl ActionPhase {
    /// Capitalized action name, as stored on the action definition
    #[inline]
    #[must_use]
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::Provision => "Provision",
            Self::Retirement => "Retirement",
            Self::Reconfigure => "Reconfigure",
        }
    }

    /// Lowercase payload key this phase is configured under
    #[inline]
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Provision => "provision",
            Self::Retirement => "retirement",
            Self::Reconfigure => "reconfigure",
        }
    }

    /// Parse a payload key into a phase
    pub fn from_key(key: &str) -> Result<Self, TemplateError> {
        match key {
            "provision" => Ok(Self::Provision),
            "retirement" => Ok(Self::Retirement),
            "reconfigure" => Ok(Self::Reconfigure),
            other => Err(TemplateError::UnknownPhase(other.to_string())),
        }
    }
}

impl fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action_name())
    }
}

/// One lifecycle action definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAction {
    /// Phase this action fires in
    pub phase: ActionPhase,
    /// Fully qualified name of the external automation entry point
    pub fqname: String,
    /// Dialog presented when the action is ordered, if any
    pub dialog_id: Option<DialogId>,
}

impl ResourceAction {
    /// Create an action for a phase
    #[inline]
    #[must_use]
    pub fn new(phase: ActionPhase, fqname: impl Into<String>, dialog_id: Option<DialogId>) -> Self {
        Self {
            phase,
            fqname: fqname.into(),
            dialog_id,
        }
    }

    /// Capitalized action name
    #[inline]
    #[must_use]
    pub fn action(&self) -> &'static str {
        self.phase.action_name()
    }
}
