//! `DB_SimMechs.scl` generator
//!
//! Non-retained simulator state arrays. The body stays empty: the CPU
//! initialises the state at startup.

use std::fmt::Write;

use super::{
    comment_text, groups, separator, unsimulated_present, RenderContext, RenderError,
};
use crate::catalog::MechType;
use crate::mapper::MapResult;

/// Generate the simulator runtime-state data block.
pub fn generate_db_sim_state(
    result: &MapResult,
    ctx: &RenderContext,
) -> Result<String, RenderError> {
    let groups = groups(result, MechType::has_simulator)?;
    let excluded = unsimulated_present(result);
    let sep = separator();
    let mut out = String::new();

    writeln!(out, "{sep}")?;
    writeln!(out, "// DB_SimMechs - Mechanism simulator state (runtime)")?;
    writeln!(out, "{sep}")?;
    writeln!(out, "// Generated: {}", comment_text(&ctx.timestamp))?;
    writeln!(out, "// Source   : {}", comment_text(&ctx.source))?;
    for t in &excluded {
        writeln!(out, "// NOTE: {t} not included (simulator not implemented)")?;
    }
    writeln!(out, "{sep}")?;
    writeln!(out)?;
    writeln!(out, "DATA_BLOCK \"DB_SimMechs\"")?;
    writeln!(out, "{{ S7_Optimized_Access := 'TRUE' }}")?;
    writeln!(out, "VERSION : 2.0")?;
    writeln!(out, "NON_RETAIN")?;
    writeln!(out)?;

    writeln!(out, "VAR")?;
    for t in &excluded {
        writeln!(out, "    // NOTE: {t} excluded, FC_Sim{t} is not implemented.")?;
    }
    for (t, _) in &groups {
        let info = t.info();
        let Some(sim) = info.simulator else { continue };
        writeln!(
            out,
            "    {:<6} : ARRAY[0..\"{}\"] OF \"{}\";",
            info.array_name,
            t.count_constant(),
            sim.state_udt
        )?;
    }
    writeln!(out, "END_VAR")?;
    writeln!(out)?;
    writeln!(out, "BEGIN")?;
    writeln!(out, "END_DATA_BLOCK")?;

    Ok(out)
}
