//! CLI Command Implementations
//!
//! This module contains the implementations for all CLI commands.

pub mod generate;
pub mod types;
