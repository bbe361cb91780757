//! `DB_Mechs.scl` generator
//!
//! Declares the global `Mechs[0..MECHS_COUNT]` slot array and one typed array
//! per present type, then binds each slot's static attributes.

use std::fmt::Write;

use super::{comment_text, groups, separator, RenderContext, RenderError};
use crate::mapper::MapResult;

/// Generate the slot array data block.
pub fn generate_db_mechs(result: &MapResult, ctx: &RenderContext) -> Result<String, RenderError> {
    let groups = groups(result, |_| true)?;
    let total = result.devices.len();
    let sep = separator();
    let mut out = String::new();

    writeln!(out, "{sep}")?;
    writeln!(out, "// DB_Mechs - Mechanism arrays")?;
    writeln!(out, "{sep}")?;
    writeln!(
        out,
        "// Project  : {} v{}",
        comment_text(&ctx.project_name),
        comment_text(&ctx.version)
    )?;
    writeln!(out, "// Generated: {}", comment_text(&ctx.timestamp))?;
    writeln!(out, "// Source   : {}", comment_text(&ctx.source))?;
    writeln!(out, "// Devices  : {total} / {total}")?;
    writeln!(out, "{sep}")?;
    writeln!(out)?;
    writeln!(out, "DATA_BLOCK \"DB_Mechs\"")?;
    writeln!(out, "{{ S7_Optimized_Access := 'TRUE' }}")?;
    writeln!(out, "VERSION : 1.0")?;
    writeln!(out)?;

    // ── VAR ──────────────────────────────────────────────────────────────────
    writeln!(out, "VAR")?;
    writeln!(
        out,
        "    Mechs  : ARRAY [0..\"MECHS_COUNT\"]   OF \"UDT_BaseMechanism\";"
    )?;
    for (t, _) in &groups {
        let info = t.info();
        writeln!(
            out,
            "    {:<6} : ARRAY [0..\"{}\"] OF \"{}\";",
            info.array_name,
            t.count_constant(),
            info.udt
        )?;
    }
    writeln!(out, "END_VAR")?;
    writeln!(out)?;

    // ── BEGIN ────────────────────────────────────────────────────────────────
    writeln!(out, "BEGIN")?;
    writeln!(out, "    // === SLOT INITIALIZATION ===")?;

    for (t, group) in &groups {
        let info = t.info();
        let id_range = match &group[..] {
            [only] => format!("slot {}", only.id),
            [first, .., last] => format!("slots {}..{}", first.id, last.id),
            [] => continue,
        };

        writeln!(out)?;
        writeln!(out, "    // --- {} ({id_range}) ---", info.array_name)?;

        for dev in group.iter() {
            writeln!(
                out,
                "    // {} \"{}\" (id={})",
                comment_text(&dev.raw_type),
                comment_text(&dev.name),
                dev.id
            )?;
            writeln!(out, "    Mechs[{}].SlotId     := {};", dev.id, dev.id)?;
            writeln!(out, "    Mechs[{}].DeviceType := \"{}\";", dev.id, info.tia_type)?;
            writeln!(out, "    Mechs[{}].TypedIndex := {};", dev.id, dev.typed_index)?;
            writeln!(out, "    Mechs[{}].Enable_OK  := TRUE;", dev.id)?;
            writeln!(out)?;
        }
    }

    writeln!(out, "END_DATA_BLOCK")?;

    Ok(out)
}
