//! `Mechs.csv` generator
//!
//! Semicolon-separated constants table for the TIA Portal tag table import:
//! `Name;Path;Data Type;Value;Comment`.

use std::fmt::Write;

use super::{RenderContext, RenderError};
use crate::catalog::SizeConstant;
use crate::mapper::MapResult;

/// Row order of the table.
pub const CSV_ORDER: [SizeConstant; 5] = [
    SizeConstant::Gates2pCount,
    SizeConstant::RedlersCount,
    SizeConstant::NoriasCount,
    SizeConstant::FansCount,
    SizeConstant::MechsCount,
];

const HEADER: &str = "Name;Path;Data Type;Value;Comment";
const TAG_TABLE: &str = "Mechs_";
const DATA_TYPE: &str = "UInt";

fn comment(constant: SizeConstant) -> &'static str {
    match constant {
        SizeConstant::MechsCount => "Upper bound of Mechs[] (max SlotId over all devices)",
        SizeConstant::RedlersCount => "Upper bound of Redler[] (number of redlers - 1)",
        SizeConstant::NoriasCount => "Upper bound of Noria[] (number of norias - 1)",
        SizeConstant::Gates2pCount => "Upper bound of Gate2P[] (number of gates - 1)",
        SizeConstant::FansCount => "Upper bound of Fan[] (number of fans - 1)",
    }
}

/// Generate the constants table.
pub fn generate_constants_csv(
    result: &MapResult,
    _ctx: &RenderContext,
) -> Result<String, RenderError> {
    let mut out = String::new();
    writeln!(out, "{HEADER}")?;
    for constant in CSV_ORDER {
        writeln!(
            out,
            "{};{TAG_TABLE};{DATA_TYPE};{};{}",
            constant.name(),
            result.count(constant),
            comment(constant)
        )?;
    }
    Ok(out)
}
