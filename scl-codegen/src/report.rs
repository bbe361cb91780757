//! Plain-text generation report (`generation_report.txt`)
//!
//! Restates a [`Diagnostics`] bundle for humans. Built only from the bundle
//! and the render context.

use std::fmt;

use crate::pipeline::{DeviceRow, Diagnostics};
use crate::render::{comment_text, ArtifactKind, RenderContext};

/// File name of the report next to the generated documents.
pub const REPORT_FILE_NAME: &str = "generation_report.txt";

/// Render the report text.
pub fn render_report(ctx: &RenderContext, diagnostics: &Diagnostics) -> String {
    Report { ctx, diagnostics }.to_string()
}

struct Report<'a> {
    ctx: &'a RenderContext,
    diagnostics: &'a Diagnostics,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Report { ctx, diagnostics } = self;

        writeln!(f, "Generated: {}", ctx.timestamp)?;
        writeln!(f, "Source: {}", ctx.source)?;
        writeln!(f, "Project: {} v{}", ctx.project_name, ctx.version)?;
        writeln!(f)?;

        writeln!(f, "Devices:")?;
        for row in diagnostics.device_rows() {
            match row {
                DeviceRow::Ok(d) | DeviceRow::Skip(d) => {
                    let (tag, suffix) = if d.has_simulator {
                        ("[OK]  ", "")
                    } else {
                        ("[SKIP]", " (no simulator)")
                    };
                    writeln!(
                        f,
                        "  {tag} id={:<3} {:<6} \"{}\"  -> {}, SlotId={}, TypedIndex={}{suffix}",
                        d.id,
                        d.type_name,
                        comment_text(&d.display_name),
                        d.tia_type,
                        d.slot_id,
                        d.typed_index
                    )?;
                }
                DeviceRow::Warn { message } => {
                    writeln!(f, "  [WARN] {}", comment_text(&message))?
                }
            }
        }

        writeln!(f)?;
        writeln!(f, "Constants:")?;
        for c in &diagnostics.constants {
            writeln!(f, "  {:<18} = {}", c.name.name(), c.value)?;
        }

        if !diagnostics.gap_slots.is_empty() {
            let slots: Vec<String> = diagnostics.gap_slots.iter().map(u32::to_string).collect();
            writeln!(f)?;
            writeln!(f, "Warnings:")?;
            writeln!(f, "  [WARN] Empty slots in Mechs[]: {}", slots.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "Files:")?;
        for kind in ArtifactKind::ALL {
            writeln!(f, "  {:<16} OK", kind.file_name())?;
        }

        Ok(())
    }
}
