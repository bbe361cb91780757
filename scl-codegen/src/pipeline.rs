//! Generation pipeline
//!
//! `graph.json` → intake → validation → mapping → four renderers, plus the
//! diagnostics bundle the caller turns into responses and reports. Each call
//! builds all of its state from scratch.

use serde::Serialize;
use tracing::{debug, error};

use crate::catalog::SizeConstant;
use crate::error::{GenerateError, GenerateResult};
use crate::graph::GraphDocument;
use crate::mapper::{map_devices, MapResult, MappedDevice};
use crate::render::{render_all, Artifact, RenderContext};
use crate::validate::validate_devices;

/// Output of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub artifacts: Vec<Artifact>,
    pub diagnostics: Diagnostics,
    #[serde(skip)]
    pub map: MapResult,
}

/// Everything a caller needs to describe the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Accepted devices sorted by id.
    pub devices: Vec<MappedDevice>,
    /// Non-mechanism warnings, in input order.
    pub warnings: Vec<String>,
    pub gap_slots: Vec<u32>,
    /// Every size constant, in report order.
    pub constants: Vec<ConstantValue>,
}

/// A named size constant and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstantValue {
    pub name: SizeConstant,
    pub value: u32,
}

/// One line of the per-device status listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeviceRow {
    /// Generated, including simulator blocks.
    Ok(DeviceStatus),
    /// Generated, but the type has no simulator.
    Skip(DeviceStatus),
    /// Recognised non-mechanism, left out.
    Warn { message: String },
}

/// Placement summary for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceStatus {
    pub id: u32,
    pub display_name: String,
    pub type_name: String,
    pub tia_type: &'static str,
    pub slot_id: u32,
    pub typed_index: u32,
    pub has_simulator: bool,
}

impl Diagnostics {
    fn new(map: &MapResult, warnings: Vec<String>) -> Self {
        Self {
            devices: map.devices_by_id().into_iter().cloned().collect(),
            warnings,
            gap_slots: map.gap_slots.clone(),
            constants: SizeConstant::ALL
                .into_iter()
                .map(|name| ConstantValue {
                    name,
                    value: map.count(name),
                })
                .collect(),
        }
    }

    /// Value of one constant (0 if absent).
    pub fn constant(&self, name: SizeConstant) -> u32 {
        self.constants
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value)
            .unwrap_or(0)
    }

    /// Device rows sorted by id, followed by one row per warning.
    pub fn device_rows(&self) -> Vec<DeviceRow> {
        let devices = self.devices.iter().map(|d| {
            let status = DeviceStatus {
                id: d.id,
                display_name: d.name.clone(),
                type_name: d.raw_type.clone(),
                tia_type: d.tia_type,
                slot_id: d.id,
                typed_index: d.typed_index,
                has_simulator: d.has_simulator,
            };
            if d.has_simulator {
                DeviceRow::Ok(status)
            } else {
                DeviceRow::Skip(status)
            }
        });
        let warnings = self.warnings.iter().map(|w| DeviceRow::Warn {
            message: w.clone(),
        });
        devices.chain(warnings).collect()
    }
}

/// Run the whole pipeline over a JSON string.
pub fn generate(src: &str, ctx: &RenderContext) -> GenerateResult<Generation> {
    let doc = GraphDocument::from_json(src)?;
    generate_document(&doc, ctx)
}

/// Run validation, mapping and rendering over an accepted document.
pub fn generate_document(doc: &GraphDocument, ctx: &RenderContext) -> GenerateResult<Generation> {
    let validation = validate_devices(&doc.devices);
    debug!(
        entries = doc.devices.len(),
        accepted = validation.devices.len(),
        issues = validation.issues.len(),
        "validated devices"
    );

    if validation.has_errors() {
        return Err(GenerateError::Validation {
            errors: validation.errors().cloned().collect(),
            warnings: validation.warnings().cloned().collect(),
        });
    }

    let warnings: Vec<String> = validation.warnings().map(|w| w.message.clone()).collect();
    let map = map_devices(&validation.devices);

    let artifacts = render_all(&map, ctx).map_err(|e| {
        error!(error = %e, "rendering failed on inconsistent mapped state");
        GenerateError::Internal(e)
    })?;
    debug!(artifacts = artifacts.len(), "rendered artifacts");

    let diagnostics = Diagnostics::new(&map, warnings);
    Ok(Generation {
        artifacts,
        diagnostics,
        map,
    })
}
