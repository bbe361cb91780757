//! `sclgen types` subcommand

use crate::error::CliResult;
use crate::output::{json, table, OutputFormat};
use clap::Args;
use scl_codegen::NON_MECHANISM_TYPES;

/// List supported mechanism types and their TIA Portal mapping
#[derive(Debug, Args)]
pub struct TypesCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,
}

impl TypesCommand {
    pub fn execute(self) -> CliResult<()> {
        match self.output {
            OutputFormat::Table => {
                println!("{}", table::format_types_table());
                println!("Skipped with a warning: {}", NON_MECHANISM_TYPES.join(", "));
            }
            OutputFormat::Json => println!("{}", json::format_types_json(true)?),
            OutputFormat::JsonCompact => println!("{}", json::format_types_json(false)?),
        }
        Ok(())
    }
}
