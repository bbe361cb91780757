//! `DB_SimConfig.scl` generator
//!
//! Retained simulator configuration: one array per simulated type, every
//! element initialised from the type's default table.

use std::fmt::Write;

use super::{
    comment_text, groups, separator, unsimulated_present, RenderContext, RenderError,
};
use crate::catalog::MechType;
use crate::mapper::MapResult;

/// Generate the simulator configuration data block.
pub fn generate_db_sim_config(
    result: &MapResult,
    ctx: &RenderContext,
) -> Result<String, RenderError> {
    let groups = groups(result, MechType::has_simulator)?;
    let excluded = unsimulated_present(result);
    let sep = separator();
    let mut out = String::new();

    writeln!(out, "{sep}")?;
    writeln!(out, "// DB_SimConfig - Mechanism simulator configuration")?;
    writeln!(out, "{sep}")?;
    writeln!(out, "// Generated: {}", comment_text(&ctx.timestamp))?;
    writeln!(out, "// Source   : {}", comment_text(&ctx.source))?;
    for t in &excluded {
        writeln!(out, "// NOTE: {t} not included (simulator not implemented)")?;
    }
    writeln!(out, "{sep}")?;
    writeln!(out)?;
    writeln!(out, "DATA_BLOCK \"DB_SimConfig\"")?;
    writeln!(out, "{{ S7_Optimized_Access := 'TRUE' }}")?;
    writeln!(out, "VERSION : 2.1")?;
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
            sim.config_udt
        )?;
    }
    writeln!(out, "END_VAR")?;
    writeln!(out)?;

    writeln!(out, "BEGIN")?;
    for (t, group) in &groups {
        let info = t.info();
        let Some(sim) = info.simulator else { continue };
        writeln!(out, "    // === {} ===", info.array_name)?;
        for dev in group.iter() {
            writeln!(
                out,
                "    // {} \"{}\" (id={}, TypedIndex={})",
                comment_text(&dev.raw_type),
                comment_text(&dev.name),
                dev.id,
                dev.typed_index
            )?;
            for (field, value) in sim.config_defaults {
                writeln!(
                    out,
                    "    {}[{}].{field} := {value};",
                    info.array_name, dev.typed_index
                )?;
            }
            writeln!(out)?;
        }
    }
    writeln!(out, "END_DATA_BLOCK")?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::{ctx, full, mapped};

    fn generated() -> String {
        generate_db_sim_config(&full(), &ctx()).unwrap()
    }

    #[test]
    fn block_frame() {
        let out = generated();
        assert!(out.contains("DATA_BLOCK \"DB_SimConfig\""));
        assert!(out.contains("VERSION : 2.1"));
        assert!(!out.contains("NON_RETAIN"));
        assert!(out.ends_with("END_DATA_BLOCK\n"));
    }

    #[test]
    fn declares_only_simulated_types() {
        let out = generated();
        assert!(out.contains("    Redler : ARRAY[0..\"REDLERS_COUNT\"] OF \"UDT_SimRedlerConfig\";"));
        assert!(out.contains("    Noria  : ARRAY[0..\"NORIAS_COUNT\"] OF \"UDT_SimNoriaConfig\";"));
        assert!(out.contains("    Fan    : ARRAY[0..\"FANS_COUNT\"] OF \"UDT_SimFanConfig\";"));
        assert!(!out.contains("GATES2P_COUNT"));
        assert!(!out.contains("Gate2P["));
    }

    #[test]
    fn annotates_excluded_gate2p() {
        let out = generated();
        assert!(out.contains("// NOTE: Gate2P not included (simulator not implemented)"));
        assert!(out.contains("    // NOTE: Gate2P excluded, FC_SimGate2P is not implemented."));
    }

    #[test]
    fn no_note_without_gate2p() {
        let r = mapped(&[(0, "Fan", MechType::Fan)]);
        let out = generate_db_sim_config(&r, &ctx()).unwrap();
        assert!(!out.contains("NOTE"));
    }

    #[test]
    fn defaults_written_per_device_in_table_order() {
        let out = generated();
        let expected = concat!(
            "    // noria \"Noria 2\" (id=2, TypedIndex=1)\n",
            "    Noria[1].Enable := TRUE;\n",
            "    Noria[1].StartupTime_ms := 4000;\n",
            "    Noria[1].StopTime_ms := 3000;\n",
            "    Noria[1].SimFault_Breaker := FALSE;\n",
            "    Noria[1].FaultTime_Breaker_ms := 10000;\n",
            "    Noria[1].SimFault_Alignment := FALSE;\n",
            "    Noria[1].FaultTime_Alignment_ms := 20000;\n",
            "    Noria[1].SimFault_Overflow := FALSE;\n",
            "    Noria[1].FaultTime_Overflow_ms := 15000;\n",
            "    Noria[1].ManualReset := FALSE;\n",
        );
        assert!(out.contains(expected), "{out}");
        assert!(out.contains("    Fan[0].StartupTime_ms := 3000;"));
        assert!(out.contains("    Redler[0].FaultTime_Overflow_ms := 15000;"));
    }

    #[test]
    fn sections_follow_canonical_order() {
        let out = generated();
        let redler = out.find("// === Redler ===").unwrap();
        let noria = out.find("// === Noria ===").unwrap();
        let fan = out.find("// === Fan ===").unwrap();
        assert!(redler < noria && noria < fan);
    }

    #[test]
    fn gate2p_only_yields_empty_arrays() {
        let r = mapped(&[(0, "Gate", MechType::Gate2P)]);
        let out = generate_db_sim_config(&r, &ctx()).unwrap();
        assert!(out.contains("VAR\n    // NOTE: Gate2P excluded"));
        assert!(out.contains("END_VAR\n\nBEGIN\nEND_DATA_BLOCK\n"));
    }

    #[test]
    fn multiline_name_stays_inside_comment() {
        let r = mapped(&[(0, "Fan\nFan[0].Enable := FALSE;", MechType::Fan)]);
        let out = generate_db_sim_config(&r, &ctx()).unwrap();
        assert!(out.contains("    // fan \"Fan Fan[0].Enable := FALSE;\" (id=0, TypedIndex=0)\n"));
        assert!(out.contains("    Fan[0].Enable := TRUE;\n"));
        assert!(!out.lines().any(|l| l.trim() == "Fan[0].Enable := FALSE;"));
    }
}
