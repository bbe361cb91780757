//! Output Formatting
//!
//! Table and JSON renderings of generation results and the type catalog.

pub mod json;
pub mod table;

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact JSON (one line)
    JsonCompact,
}
