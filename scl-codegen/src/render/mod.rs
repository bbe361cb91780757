//! SCL / CSV renderers
//!
//! Four independent generators over one [`MapResult`]:
//!
//! - [`mechs`]: `DB_Mechs.scl`, the global slot array plus typed arrays
//! - [`sim_config`]: `DB_SimConfig.scl`, simulator defaults (retained)
//! - [`sim_state`]: `DB_SimMechs.scl`, simulator runtime state (non-retained)
//! - [`constants`]: `Mechs.csv`, array bound constants for the tag table
//!
//! Type groups are always emitted in [`MechType::ALL`] order and empty groups
//! are left out. Types without a simulator never appear in the simulator
//! blocks; when such devices are present the blocks say so in a `NOTE`.

pub mod constants;
pub mod mechs;
pub mod sim_config;
pub mod sim_state;

use std::borrow::Cow;

use serde::Serialize;

use crate::catalog::MechType;
use crate::mapper::{MapResult, MappedDevice};

pub use constants::generate_constants_csv;
pub use mechs::generate_db_mechs;
pub use sim_config::generate_db_sim_config;
pub use sim_state::generate_db_sim_state;

// ── Context ───────────────────────────────────────────────────────────────────

/// Caller-supplied metadata written into document headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderContext {
    pub project_name: String,
    pub version: String,
    /// Preformatted generation time; the core never reads the clock.
    pub timestamp: String,
    /// Name of the input file.
    pub source: String,
}

impl RenderContext {
    pub fn new(
        project_name: impl Into<String>,
        version: impl Into<String>,
        timestamp: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            version: version.into(),
            timestamp: timestamp.into(),
            source: source.into(),
        }
    }
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// The mapped state handed to a renderer is not self-consistent.
///
/// Never caused by user input; see [`crate::GenerateError::Internal`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("device {id} of type {found} filed under the {group} group")]
    MisfiledDevice {
        id: u32,
        found: MechType,
        group: MechType,
    },

    #[error("device {id} in the {group} group has TypedIndex {typed_index}, expected {expected}")]
    TypedIndexMismatch {
        id: u32,
        group: MechType,
        typed_index: u32,
        expected: u32,
    },

    #[error("{group} group is not sorted by id at device {id}")]
    UnsortedGroup { group: MechType, id: u32 },

    #[error("formatting failed")]
    Format(#[from] std::fmt::Error),
}

impl RenderError {
    /// Short variant name, safe to show to end users.
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::MisfiledDevice { .. } => "MisfiledDevice",
            RenderError::TypedIndexMismatch { .. } => "TypedIndexMismatch",
            RenderError::UnsortedGroup { .. } => "UnsortedGroup",
            RenderError::Format(_) => "Format",
        }
    }
}

// ── Artifacts ─────────────────────────────────────────────────────────────────

/// One of the generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArtifactKind {
    DbMechs,
    DbSimConfig,
    DbSimState,
    ConstantsCsv,
}

impl ArtifactKind {
    /// All documents in output order.
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::DbMechs,
        ArtifactKind::DbSimConfig,
        ArtifactKind::DbSimState,
        ArtifactKind::ConstantsCsv,
    ];

    /// File name the engineering tool expects.
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::DbMechs => "DB_Mechs.scl",
            ArtifactKind::DbSimConfig => "DB_SimConfig.scl",
            ArtifactKind::DbSimState => "DB_SimMechs.scl",
            ArtifactKind::ConstantsCsv => "Mechs.csv",
        }
    }
}

/// A rendered document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: &'static str,
    pub contents: String,
}

/// Run all four renderers.
pub fn render_all(result: &MapResult, ctx: &RenderContext) -> Result<Vec<Artifact>, RenderError> {
    ArtifactKind::ALL
        .into_iter()
        .map(|kind| {
            let contents = match kind {
                ArtifactKind::DbMechs => generate_db_mechs(result, ctx)?,
                ArtifactKind::DbSimConfig => generate_db_sim_config(result, ctx)?,
                ArtifactKind::DbSimState => generate_db_sim_state(result, ctx)?,
                ArtifactKind::ConstantsCsv => generate_constants_csv(result, ctx)?,
            };
            Ok(Artifact {
                kind,
                file_name: kind.file_name(),
                contents,
            })
        })
        .collect()
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// `// ====…` rule used around block headers.
pub(crate) fn separator() -> String {
    format!("// {}", "=".repeat(78))
}

/// `text` made safe for a `//` line comment.
///
/// Control characters and Unicode line separators become spaces, so a device
/// name can never end the comment and leak into the block body.
pub(crate) fn comment_text(text: &str) -> Cow<'_, str> {
    let breaks = |c: char| c.is_control() || matches!(c, '\u{2028}' | '\u{2029}');
    if text.chars().any(breaks) {
        Cow::Owned(text.chars().map(|c| if breaks(c) { ' ' } else { c }).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Non-empty groups in canonical order, restricted by `filter`.
///
/// Each group is checked against the ordering invariants the renderers rely on.
pub(crate) fn groups(
    result: &MapResult,
    filter: impl Fn(MechType) -> bool,
) -> Result<Vec<(MechType, &[MappedDevice])>, RenderError> {
    let mut out = Vec::new();
    for t in MechType::ALL {
        if !filter(t) {
            continue;
        }
        let group = result.group(t);
        if group.is_empty() {
            continue;
        }
        check_group(t, group)?;
        out.push((t, group));
    }
    Ok(out)
}

fn check_group(group_type: MechType, group: &[MappedDevice]) -> Result<(), RenderError> {
    let mut prev: Option<u32> = None;
    for (dev, expected) in group.iter().zip(0u32..) {
        if dev.mech_type != group_type {
            return Err(RenderError::MisfiledDevice {
                id: dev.id,
                found: dev.mech_type,
                group: group_type,
            });
        }
        if prev.is_some_and(|p| p >= dev.id) {
            return Err(RenderError::UnsortedGroup {
                group: group_type,
                id: dev.id,
            });
        }
        if dev.typed_index != expected {
            return Err(RenderError::TypedIndexMismatch {
                id: dev.id,
                group: group_type,
                typed_index: dev.typed_index,
                expected,
            });
        }
        prev = Some(dev.id);
    }
    Ok(())
}

/// Present types that are excluded from the simulator blocks.
pub(crate) fn unsimulated_present(result: &MapResult) -> Vec<MechType> {
    MechType::ALL
        .into_iter()
        .filter(|t| !t.has_simulator() && !result.group(*t).is_empty())
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::catalog::MechType;
    use crate::mapper::{map_devices, MapResult};
    use crate::validate::RawDevice;

    use super::RenderContext;

    pub fn ctx() -> RenderContext {
        RenderContext::new("Elevator_System", "1.0.0", "2026-01-01 12:00:00", "graph.json")
    }

    pub fn mapped(devices: &[(u32, &str, MechType)]) -> MapResult {
        let raw: Vec<RawDevice> = devices
            .iter()
            .map(|&(id, name, mech_type)| RawDevice {
                id,
                name: name.to_string(),
                mech_type,
                raw_type: mech_type.key().to_string(),
            })
            .collect();
        map_devices(&raw)
    }

    /// Noria ×2, Redler, Gate2P, Fan.
    pub fn full() -> MapResult {
        mapped(&[
            (1, "Noria", MechType::Noria),
            (2, "Noria 2", MechType::Noria),
            (3, "Redler", MechType::Redler),
            (4, "Gate", MechType::Gate2P),
            (6, "Fan", MechType::Fan),
        ])
    }
}
