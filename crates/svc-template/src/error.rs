//! Error types for the template data model

/// Errors raised while building template data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// Payload named a lifecycle phase the model does not know
    #[error("unknown action phase: {0}")]
    UnknownPhase(String),
}
