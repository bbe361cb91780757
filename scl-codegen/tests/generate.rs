//! End-to-end generation tests over complete `graph.json` documents.

use scl_codegen::{
    generate, render_report, ArtifactKind, DeviceRow, GenerateError, MechType, RenderContext,
    Severity, SizeConstant,
};

fn ctx() -> RenderContext {
    RenderContext::new("Elevator_System", "1.0.0", "2026-02-22 14:00:00", "graph.json")
}

fn artifact(generation: &scl_codegen::Generation, kind: ArtifactKind) -> &str {
    generation
        .artifacts
        .iter()
        .find(|a| a.kind == kind)
        .map(|a| a.contents.as_str())
        .unwrap()
}

const ELEVATOR: &str = r#"{
    "deviceTypes": [{"type": "noria"}, {"type": "redler"}],
    "devices": [
        {"name": "Fan", "id": 5, "type": "fan", "x": 120, "y": 40},
        {"name": "Noria 2", "id": 2, "type": "noria"},
        {"name": "Redler", "id": "3", "type": "Redler"},
        {"name": "Noria", "id": 1, "type": "noria"}
    ]
}"#;

#[test]
fn elevator_round_trip() {
    let generation = generate(ELEVATOR, &ctx()).unwrap();
    let map = &generation.map;

    assert_eq!(map.extent, 5);
    assert_eq!(map.gap_slots, vec![0, 4]);
    assert_eq!(map.count(SizeConstant::MechsCount), 5);
    assert_eq!(map.count(SizeConstant::NoriasCount), 1);
    assert_eq!(map.count(SizeConstant::RedlersCount), 0);
    assert_eq!(map.count(SizeConstant::FansCount), 0);
    assert_eq!(map.count(SizeConstant::Gates2pCount), 0);

    let ranks: Vec<(u32, u32)> = generation
        .diagnostics
        .devices
        .iter()
        .map(|d| (d.id, d.typed_index))
        .collect();
    assert_eq!(ranks, vec![(1, 0), (2, 1), (3, 0), (5, 0)]);
}

#[test]
fn input_order_does_not_change_output() {
    let shuffled = r#"{
        "deviceTypes": [],
        "devices": [
            {"name": "Noria", "id": 1, "type": "noria"},
            {"name": "Redler", "id": 3, "type": "Redler"},
            {"name": "Fan", "id": 5, "type": "fan"},
            {"name": "Noria 2", "id": 2, "type": "noria"}
        ]
    }"#;
    let a = generate(ELEVATOR, &ctx()).unwrap();
    let b = generate(shuffled, &ctx()).unwrap();

    for kind in ArtifactKind::ALL {
        assert_eq!(artifact(&a, kind), artifact(&b, kind), "{kind:?}");
    }
    assert_eq!(a.diagnostics.gap_slots, b.diagnostics.gap_slots);
}

#[test]
fn db_mechs_binds_every_slot() {
    let generation = generate(ELEVATOR, &ctx()).unwrap();
    let db = artifact(&generation, ArtifactKind::DbMechs);

    assert!(db.contains("// Project  : Elevator_System v1.0.0"));
    assert!(db.contains("Mechs[3].DeviceType := \"TYPE_REDLER\";"));
    assert!(db.contains("Mechs[2].TypedIndex := 1;"));
    assert!(db.contains("Mechs[5].TypedIndex := 0;"));
    assert!(!db.contains("Mechs[4]."));
    assert!(!db.contains("Gate2P"));
}

#[test]
fn sim_config_writes_defaults_per_typed_index() {
    let generation = generate(ELEVATOR, &ctx()).unwrap();
    let db = artifact(&generation, ArtifactKind::DbSimConfig);

    assert!(db.contains("VERSION : 2.1"));
    assert!(db.contains("Noria[1].StartupTime_ms := 4000;"));
    assert!(db.contains("Fan[0].FaultTime_Breaker_ms := 10000;"));
    assert!(!db.contains("NOTE"));
}

#[test]
fn gates_are_annotated_in_simulator_blocks() {
    let src = r#"{"deviceTypes": [], "devices": [
        {"name": "Gate A", "id": 0, "type": "gate2P"},
        {"name": "Fan", "id": 1, "type": "fan"}
    ]}"#;
    let generation = generate(src, &ctx()).unwrap();

    for kind in [ArtifactKind::DbSimConfig, ArtifactKind::DbSimState] {
        let db = artifact(&generation, kind);
        assert!(db.contains("// NOTE: Gate2P not included (simulator not implemented)"));
        assert!(db.contains("    // NOTE: Gate2P excluded, FC_SimGate2P is not implemented."));
        assert!(!db.contains("UDT_SimGate2P"));
    }

    let mechs = artifact(&generation, ArtifactKind::DbMechs);
    assert!(mechs.contains("Gate2P : ARRAY [0..\"GATES2P_COUNT\"] OF \"UDT_Gate2P\";"));
}

#[test]
fn empty_graph_generates_empty_blocks() {
    let generation = generate(r#"{"deviceTypes": [], "devices": []}"#, &ctx()).unwrap();

    assert_eq!(generation.map.extent, 0);
    assert!(generation.map.gap_slots.is_empty());
    assert!(generation.diagnostics.devices.is_empty());
    for c in &generation.diagnostics.constants {
        assert_eq!(c.value, 0, "{}", c.name);
    }
    assert_eq!(generation.artifacts.len(), 4);
}

#[test]
fn duplicates_and_bad_ids_are_all_reported() {
    let src = r#"{"deviceTypes": [], "devices": [
        {"name": "First", "id": 1, "type": "noria"},
        {"name": "Second", "id": 1, "type": "fan"},
        {"name": "Negative", "id": -2, "type": "fan"},
        {"name": "Word", "id": "abc", "type": "fan"},
        {"name": "Nothing", "type": "fan"},
        {"name": "Pump", "id": 9, "type": "Pump"}
    ]}"#;
    let err = generate(src, &ctx()).unwrap_err();
    let GenerateError::Validation { errors, warnings } = &err else {
        panic!("expected validation failure, got {err:?}");
    };

    assert_eq!(errors.len(), 5);
    assert!(errors.iter().all(|e| e.severity == Severity::Error));
    assert!(errors[0].message.contains("\"First\""));
    assert_eq!(errors[0].location, "devices[1]");
    assert!(errors[1].message.contains("negative"));
    assert!(errors[4].message.contains("\"Pump\""));
    assert!(warnings.is_empty());
    assert!(err.is_input_error());
}

#[test]
fn non_mechanisms_warn_and_are_dropped() {
    let src = r#"{"deviceTypes": [], "devices": [
        {"name": "Silo 1", "id": 0, "type": "Silo"},
        {"name": "Level", "id": 2, "type": "sensor"},
        {"name": "Noria", "id": 1, "type": "noria"}
    ]}"#;
    let generation = generate(src, &ctx()).unwrap();
    let d = &generation.diagnostics;

    assert_eq!(d.warnings.len(), 2);
    assert_eq!(d.devices.len(), 1);
    assert_eq!(d.devices[0].mech_type, MechType::Noria);
    assert_eq!(d.gap_slots, vec![0]);

    let rows = d.device_rows();
    assert_eq!(rows.len(), 3);
    assert!(matches!(rows[1], DeviceRow::Warn { .. }));
}

#[test]
fn structural_problems_stop_before_validation() {
    let err = generate(r#"[1, 2, 3]"#, &ctx()).unwrap_err();
    assert!(matches!(err, GenerateError::Structural(_)));

    let err = generate(r#"{}"#, &ctx()).unwrap_err();
    assert_eq!(
        err.messages(),
        vec![
            "missing field 'devices'".to_string(),
            "missing field 'deviceTypes'".to_string()
        ]
    );
}

#[test]
fn report_restates_diagnostics() {
    let generation = generate(ELEVATOR, &ctx()).unwrap();
    let report = render_report(&ctx(), &generation.diagnostics);

    assert!(report.starts_with("Generated: 2026-02-22 14:00:00\n"));
    assert!(report.contains("  [OK]   id=3   Redler \"Redler\"  -> TYPE_REDLER, SlotId=3, TypedIndex=0\n"));
    assert!(report.contains("  NORIAS_COUNT       = 1\n"));
    assert!(report.contains("  [WARN] Empty slots in Mechs[]: 0, 4\n"));
    assert!(report.contains("  Mechs.csv        OK\n"));
}
