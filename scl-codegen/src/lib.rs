//! SCL Codegen - device graph to TIA Portal data blocks
//!
//! This library reads a `graph.json` device graph and emits four artefacts for
//! a Siemens TIA Portal project:
//!
//! - **`DB_Mechs.scl`**: global `Mechs[]` slot array plus typed arrays
//!   (see [`generate_db_mechs`])
//! - **`DB_SimConfig.scl`**: simulator default configuration
//!   (see [`generate_db_sim_config`])
//! - **`DB_SimMechs.scl`**: simulator runtime state (see [`generate_db_sim_state`])
//! - **`Mechs.csv`**: array bound constants (see [`generate_constants_csv`])
//!
//! The pipeline is intake ([`GraphDocument`]) → [`validate_devices`] →
//! [`map_devices`] → renderers, wrapped by [`generate`].
//!
//! # Usage
//!
//! ```rust
//! use scl_codegen::{generate, render_report, RenderContext, SizeConstant};
//!
//! let graph = r#"{
//!     "deviceTypes": [],
//!     "devices": [
//!         {"name": "Noria", "id": 1, "type": "noria"},
//!         {"name": "Noria 2", "id": 2, "type": "noria"},
//!         {"name": "Redler", "id": 3, "type": "redler"},
//!         {"name": "Fan", "id": 5, "type": "fan"}
//!     ]
//! }"#;
//!
//! let ctx = RenderContext::new("Elevator_System", "1.0.0", "2026-02-22 14:00:00", "graph.json");
//! let generation = generate(graph, &ctx).unwrap();
//!
//! assert_eq!(generation.diagnostics.gap_slots, vec![0, 4]);
//! assert_eq!(generation.diagnostics.constant(SizeConstant::NoriasCount), 1);
//! assert!(generation.artifacts[0].contents.contains("DATA_BLOCK \"DB_Mechs\""));
//!
//! let report = render_report(&ctx, &generation.diagnostics);
//! assert!(report.contains("MECHS_COUNT        = 5"));
//! ```

pub mod catalog;
pub mod error;
pub mod graph;
pub mod mapper;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod validate;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use catalog::{MechType, SimulatorInfo, SizeConstant, TypeInfo, NON_MECHANISM_TYPES};
pub use error::{GenerateError, GenerateResult};
pub use graph::{GraphDocument, StructuralError};
pub use mapper::{map_devices, MapResult, MappedDevice};
pub use pipeline::{
    generate, generate_document, ConstantValue, DeviceRow, DeviceStatus, Diagnostics, Generation,
};
pub use render::{
    generate_constants_csv, generate_db_mechs, generate_db_sim_config, generate_db_sim_state,
    render_all, Artifact, ArtifactKind, RenderContext, RenderError,
};
pub use report::{render_report, REPORT_FILE_NAME};
pub use validate::{validate_devices, DeviceValidation, RawDevice, Severity, ValidationError};
