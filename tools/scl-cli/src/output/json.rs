//! JSON Output Formatting

use scl_codegen::{MechType, NON_MECHANISM_TYPES};
use serde::Serialize;

/// Format data as pretty JSON
pub fn format_json_pretty<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// Format data as compact JSON (one line)
pub fn format_json_compact<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}

/// Format the type catalog as JSON
pub fn format_types_json(pretty: bool) -> Result<String, serde_json::Error> {
    let types: Vec<_> = MechType::ALL
        .into_iter()
        .map(|t| {
            let info = t.info();
            serde_json::json!({
                "key": info.key,
                "tia_type": info.tia_type,
                "udt": info.udt,
                "array": info.array_name,
                "count_constant": t.count_constant(),
                "simulator": info.simulator.map(|s| serde_json::json!({
                    "state_udt": s.state_udt,
                    "config_udt": s.config_udt,
                    "defaults": s.config_defaults
                        .iter()
                        .map(|(field, value)| serde_json::json!({ "field": field, "value": value }))
                        .collect::<Vec<_>>(),
                })),
            })
        })
        .collect();

    let data = serde_json::json!({
        "mechanisms": types,
        "non_mechanisms": NON_MECHANISM_TYPES,
    });

    if pretty {
        format_json_pretty(&data)
    } else {
        format_json_compact(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_json() {
        let pretty = format_types_json(true).unwrap();
        assert!(pretty.contains('\n'));

        let compact = format_types_json(false).unwrap();
        assert!(!compact.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(value["mechanisms"].as_array().unwrap().len(), 4);
        assert_eq!(value["mechanisms"][2]["key"], "gate2p");
        assert!(value["mechanisms"][2]["simulator"].is_null());
        assert_eq!(value["mechanisms"][1]["count_constant"], "NORIAS_COUNT");
        assert_eq!(value["non_mechanisms"][0], "silo");
    }
}
