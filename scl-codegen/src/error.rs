//! Generation error types

use thiserror::Error;

use crate::graph::StructuralError;
use crate::render::RenderError;
use crate::validate::ValidationError;

/// Result type for a generation run.
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Why a generation run produced no artifacts.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The input is not a device graph (bad JSON, wrong shape, missing fields).
    #[error("invalid graph: {0}")]
    Structural(#[from] StructuralError),

    /// One or more devices failed validation. Warnings are carried along so
    /// callers can show them next to the errors.
    #[error("validation failed with {} error(s)", .errors.len())]
    Validation {
        errors: Vec<ValidationError>,
        warnings: Vec<ValidationError>,
    },

    /// Rendering hit an inconsistent mapped state. Display stays opaque;
    /// the detail is available through `source()`.
    #[error("internal error: {}", .0.kind())]
    Internal(#[source] RenderError),
}

impl GenerateError {
    /// User-facing messages, one per line of output.
    pub fn messages(&self) -> Vec<String> {
        match self {
            GenerateError::Structural(e) => e.messages.clone(),
            GenerateError::Validation { errors, .. } => {
                errors.iter().map(|e| e.message.clone()).collect()
            }
            GenerateError::Internal(_) => vec![self.to_string()],
        }
    }

    /// Warnings gathered before the run was aborted.
    pub fn warnings(&self) -> &[ValidationError] {
        match self {
            GenerateError::Validation { warnings, .. } => warnings,
            _ => &[],
        }
    }

    /// Returns `true` if the failure was caused by the input rather than a bug.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, GenerateError::Internal(_))
    }
}
