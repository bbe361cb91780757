//! `sclgen generate` subcommand
//!
//! Reads a `graph.json` and emits into the output directory:
//! - `DB_Mechs.scl`, `DB_SimConfig.scl`, `DB_SimMechs.scl`, `Mechs.csv`
//!   (UTF-8 with BOM, ready for TIA Portal external source import)
//! - `generation_report.txt`: per-device status, constants, warnings
//!
//! # Usage
//!
//! ```text
//! sclgen generate graph.json                     # write into ./generated
//! sclgen generate graph.json --out plc/sources   # custom output directory
//! sclgen generate graph.json --check             # validate only (CI)
//! sclgen generate graph.json --dry-run           # print to stdout, don't write
//! sclgen generate graph.json --json              # diagnostics as JSON
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use colored::Colorize;
use scl_codegen::{
    generate, render_report, ConstantValue, DeviceRow, GenerateError, Generation, RenderContext,
    Severity, ValidationError, REPORT_FILE_NAME,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::bundle::{bundle_files, write_if_changed, WriteStatus};
use crate::error::{CliError, CliResult};
use crate::output::{json, table};

const DEFAULT_PROJECT_NAME: &str = "Elevator_System";
const DEFAULT_PROJECT_VERSION: &str = "1.0.0";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Generate SCL data blocks and constants from a device graph
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Path to graph.json
    pub input: PathBuf,

    /// Output directory for the generated files
    #[arg(short, long, default_value = "generated")]
    pub out: PathBuf,

    /// Project name written into block headers
    #[arg(long, env = "DEFAULT_PROJECT_NAME", default_value = DEFAULT_PROJECT_NAME)]
    pub project_name: String,

    /// Project version written into block headers
    #[arg(long, default_value = DEFAULT_PROJECT_VERSION)]
    pub project_version: String,

    /// Reject inputs larger than this many megabytes
    #[arg(long, env = "MAX_UPLOAD_SIZE_MB", default_value_t = 10)]
    pub max_size_mb: u64,

    /// Validate graph.json without writing files (exit 1 if errors found)
    #[arg(long)]
    pub check: bool,

    /// Print generated output to stdout instead of writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Print diagnostics as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

/// `--json` payload for a successful run.
#[derive(Debug, Serialize)]
struct GenerateSummary<'a> {
    project: &'a RenderContext,
    devices: Vec<DeviceRow>,
    constants: &'a [ConstantValue],
    gap_slots: &'a [u32],
    files: Vec<&'a str>,
}

/// `--json` payload for a rejected input.
#[derive(Debug, Serialize)]
struct FailureSummary<'a> {
    errors: Vec<String>,
    warnings: &'a [ValidationError],
}

impl GenerateCommand {
    pub fn execute(self) -> CliResult<()> {
        let stdout = std::io::stdout();
        self.run(&mut stdout.lock())
    }

    /// Run the command, writing the payload (tables, JSON, dry-run text) to
    /// `out`. Status lines and diagnostics go to stderr in `--json` mode.
    fn run(&self, out: &mut impl Write) -> CliResult<()> {
        // ── Read graph.json ────────────────────────────────────────────────
        let src = read_input(&self.input, self.max_size_mb)?;
        let ctx = self.render_context();
        debug!(input = %self.input.display(), bytes = src.len(), "read graph");

        // ── Validate + generate ────────────────────────────────────────────
        let generation = match generate(&src, &ctx) {
            Ok(generation) => generation,
            Err(e) => return Err(self.reject(e, out)),
        };

        print_warnings(&generation);

        if self.check {
            if self.json {
                writeln!(out, "{}", json::format_json_pretty(&summary(&ctx, &generation))?)?;
            } else {
                writeln!(
                    out,
                    "{} {} validated successfully ({} device(s))",
                    "✓".green(),
                    self.input.display(),
                    generation.diagnostics.devices.len()
                )?;
            }
            return Ok(());
        }

        let report = render_report(&ctx, &generation.diagnostics);

        if self.dry_run {
            for artifact in &generation.artifacts {
                writeln!(out, "{}  {}", "──".dimmed(), artifact.file_name.dimmed())?;
                writeln!(out, "{}", artifact.contents)?;
            }
            writeln!(out, "{}  {}", "──".dimmed(), REPORT_FILE_NAME.dimmed())?;
            writeln!(out, "{report}")?;
            return Ok(());
        }

        // ── Write files ────────────────────────────────────────────────────
        let files = bundle_files(&generation, &report);
        for file in &files {
            let path = self.out.join(file.file_name);
            let line = match write_if_changed(&path, &file.bytes)? {
                WriteStatus::Written => format!("  {} {} written", "→".cyan(), path.display()),
                WriteStatus::Unchanged => {
                    format!("  {} {} unchanged", "·".dimmed(), path.display())
                }
            };
            if self.json {
                eprintln!("{line}");
            } else {
                writeln!(out, "{line}")?;
            }
        }
        info!(files = files.len(), out = %self.out.display(), "generation complete");

        if self.json {
            writeln!(out, "{}", json::format_json_pretty(&summary(&ctx, &generation))?)?;
        } else {
            let rows = generation.diagnostics.device_rows();
            writeln!(out, "{}", table::format_device_rows_table(&rows))?;
            writeln!(
                out,
                "{}",
                table::format_constants_table(&generation.diagnostics.constants)
            )?;
            writeln!(
                out,
                "{} {} device(s) processed",
                "✓".green(),
                generation.diagnostics.devices.len()
            )?;
        }

        Ok(())
    }

    fn render_context(&self) -> RenderContext {
        RenderContext::new(
            non_empty_or(&self.project_name, DEFAULT_PROJECT_NAME),
            non_empty_or(&self.project_version, DEFAULT_PROJECT_VERSION),
            chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            source_name(&self.input),
        )
    }

    /// Report what is wrong with the input and turn it into a CLI error.
    fn reject(&self, err: GenerateError, out: &mut impl Write) -> CliError {
        let path = self.input.display().to_string();
        if self.json && err.is_input_error() {
            let failure = FailureSummary {
                errors: err.messages(),
                warnings: err.warnings(),
            };
            let written = json::format_json_pretty(&failure)
                .map_err(CliError::from)
                .and_then(|text| writeln!(out, "{text}").map_err(CliError::from));
            if let Err(e) = written {
                return e;
            }
        }

        match err {
            GenerateError::Structural(e) => CliError::invalid_graph(path, e.messages),
            GenerateError::Validation { errors, warnings } => {
                if !self.json {
                    print_validation_results(&errors, &warnings, &self.input);
                }
                CliError::ValidationFailed {
                    count: errors.len(),
                }
            }
            internal @ GenerateError::Internal(_) => CliError::Internal(internal),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_input(path: &Path, max_size_mb: u64) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::input_not_found(path.display().to_string()));
    }

    let size = std::fs::metadata(path)
        .with_context(|| format!("reading metadata of {}", path.display()))?
        .len();
    if size > max_size_mb.saturating_mul(1024 * 1024) {
        return Err(CliError::input_too_large(
            path.display().to_string(),
            size,
            max_size_mb,
        ));
    }

    match std::fs::read_to_string(path) {
        Ok(src) => Ok(src),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => Err(CliError::invalid_graph(
            path.display().to_string(),
            vec![format!("invalid JSON: {e}")],
        )),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("reading {}", path.display()))
            .into()),
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph.json".to_string())
}

fn summary<'a>(ctx: &'a RenderContext, generation: &'a Generation) -> GenerateSummary<'a> {
    GenerateSummary {
        project: ctx,
        devices: generation.diagnostics.device_rows(),
        constants: &generation.diagnostics.constants,
        gap_slots: &generation.diagnostics.gap_slots,
        files: generation.artifacts.iter().map(|a| a.file_name).collect(),
    }
}

fn print_warnings(generation: &Generation) {
    for w in &generation.diagnostics.warnings {
        eprintln!("{} {}", "!".yellow(), w);
    }
    let gaps = &generation.diagnostics.gap_slots;
    if !gaps.is_empty() {
        let slots: Vec<String> = gaps.iter().map(u32::to_string).collect();
        eprintln!("{} empty slots in Mechs[]: {}", "!".yellow(), slots.join(", "));
    }
}

/// Print validation errors and warnings of a rejected graph.
fn print_validation_results(
    errors: &[ValidationError],
    warnings: &[ValidationError],
    input: &Path,
) {
    for e in errors.iter().chain(warnings) {
        match e.severity {
            Severity::Error => eprintln!("{} [{}] {}", "✗".red(), e.location, e.message),
            Severity::Warning => eprintln!("{} [{}] {}", "!".yellow(), e.location, e.message),
        }
    }
    eprintln!("  in: {}", input.display());
}
