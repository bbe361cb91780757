//! CLI Error Types
//!
//! Error messages carry a hint line where the fix is not obvious.

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI-specific errors with helpful messages and hints
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("Input file not found: {path}\n  Hint: pass the graph.json exported by the graph editor")]
    InputNotFound { path: String },

    /// Input file exceeds the configured size limit
    #[error("Input too large: {path} ({size} bytes)\n  Limit: {limit_mb} MB\n  Hint: raise --max-size-mb or MAX_UPLOAD_SIZE_MB")]
    InputTooLarge {
        path: String,
        size: u64,
        limit_mb: u64,
    },

    /// The input is not a device graph
    #[error("Invalid graph: {path}{}", format_messages(.messages))]
    InvalidGraph { path: String, messages: Vec<String> },

    /// One or more devices failed validation (details already printed)
    #[error("Validation failed with {count} error(s)\n  Hint: fix the devices listed above and retry")]
    ValidationFailed { count: usize },

    /// Rendering hit an inconsistent state
    #[error("{0}\n  Hint: this is a bug in sclgen, please report it with the input graph")]
    Internal(scl_codegen::GenerateError),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

fn format_messages(messages: &[String]) -> String {
    messages.iter().map(|m| format!("\n  - {m}")).collect()
}

impl CliError {
    /// Create an input not found error
    pub fn input_not_found(path: impl Into<String>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Create an input too large error
    pub fn input_too_large(path: impl Into<String>, size: u64, limit_mb: u64) -> Self {
        Self::InputTooLarge {
            path: path.into(),
            size,
            limit_mb,
        }
    }

    /// Create an invalid graph error
    pub fn invalid_graph(path: impl Into<String>, messages: Vec<String>) -> Self {
        Self::InvalidGraph {
            path: path.into(),
            messages,
        }
    }
}
