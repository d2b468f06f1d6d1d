//! Construction-time errors.
//!
//! Every error here is raised while a statement is being *built*. Rendering
//! a node that was successfully constructed never fails.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Malformed or empty navigation where a path was required.
    #[error("Path resolution error: {0}")]
    PathResolution(String),

    /// A clause built with a structurally invalid argument.
    #[error("Invalid clause: {0}")]
    InvalidClause(String),

    /// `AND`/`OR` given zero operands.
    #[error("Empty composition: {0} requires at least one operand")]
    EmptyComposition(&'static str),
}

impl CompileError {
    pub(crate) fn path(msg: impl Into<String>) -> Self {
        CompileError::PathResolution(msg.into())
    }

    pub(crate) fn clause(msg: impl Into<String>) -> Self {
        CompileError::InvalidClause(msg.into())
    }
}

/// Rejects empty alias, variable and collection names.
pub(crate) fn require_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CompileError::clause(format!("{} name cannot be empty", kind)));
    }
    Ok(())
}
