//! Table Output Formatting

use colored::Colorize;
use scl_codegen::{ConstantValue, DeviceRow, MechType};
use tabled::{builder::Builder, settings::Style};

/// Format per-device status rows as a table
pub fn format_device_rows_table(rows: &[DeviceRow]) -> String {
    if rows.is_empty() {
        return "No devices found".to_string();
    }

    let mut builder = Builder::default();

    // Add header
    builder.push_record(vec![
        "Status",
        "Id",
        "Name",
        "Type",
        "TIA Type",
        "Typed Index",
    ]);

    // Add rows
    for row in rows {
        match row {
            DeviceRow::Ok(d) | DeviceRow::Skip(d) => {
                let status = if d.has_simulator {
                    "OK".green().to_string()
                } else {
                    "SKIP".yellow().to_string()
                };
                builder.push_record(vec![
                    status,
                    d.slot_id.to_string(),
                    d.display_name.clone(),
                    d.type_name.clone(),
                    d.tia_type.to_string(),
                    d.typed_index.to_string(),
                ]);
            }
            DeviceRow::Warn { message } => {
                builder.push_record(vec![
                    "WARN".yellow().to_string(),
                    String::new(),
                    message.clone(),
                    String::new(),
                    String::new(),
                    String::new(),
                ]);
            }
        }
    }

    builder.build().with(Style::modern()).to_string()
}

/// Format size constants as a table
pub fn format_constants_table(constants: &[ConstantValue]) -> String {
    let mut builder = Builder::default();
    builder.push_record(vec!["Constant", "Value"]);
    for c in constants {
        builder.push_record(vec![c.name.name().to_string(), c.value.to_string()]);
    }
    builder.build().with(Style::modern()).to_string()
}

/// Format the type catalog
pub fn format_types_table() -> String {
    let mut builder = Builder::default();

    builder.push_record(vec![
        "Key",
        "TIA Type",
        "UDT",
        "Array",
        "Bound",
        "Simulator",
    ]);

    for t in MechType::ALL {
        let info = t.info();
        let simulator = match info.simulator {
            Some(sim) => format!("{} / {}", sim.state_udt, sim.config_udt),
            None => "none".dimmed().to_string(),
        };
        builder.push_record(vec![
            info.key.to_string(),
            info.tia_type.to_string(),
            info.udt.to_string(),
            info.array_name.to_string(),
            t.count_constant().to_string(),
            simulator,
        ]);
    }

    builder.build().with(Style::modern()).to_string()
}
