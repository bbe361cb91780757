//! Device list validator
//!
//! Checks every entry of `devices` in input order and splits them into
//! accepted mechanisms, warnings (recognised non-mechanisms) and errors.
//! All problems are collected; nothing here fails fast.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::{is_non_mechanism, MechType};

/// Display name used when a device has none.
pub const UNNAMED: &str = "<unnamed>";

/// Highest slot id; the size constants are declared `UInt` in the tag table.
pub const MAX_SLOT: u32 = u16::MAX as u32;

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Human-readable description of the problem.
    pub message: String,
    /// Position in the input, e.g. `devices[3]`.
    pub location: String,
    /// Whether this blocks generation (`Error`) or is informational (`Warning`).
    pub severity: Severity,
}

/// Severity of a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Aborts the run before mapping.
    Error,
    /// Surfaced alongside successful output.
    Warning,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };
        write!(f, "[{}] {}: {}", tag, self.location, self.message)
    }
}

/// A device that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawDevice {
    /// Slot in the global `Mechs[]` array.
    pub id: u32,
    pub name: String,
    #[serde(rename = "type_key")]
    pub mech_type: MechType,
    /// Type string exactly as it appeared in the input.
    pub raw_type: String,
}

impl RawDevice {
    /// Normalised lowercase type key.
    pub fn type_key(&self) -> &'static str {
        self.mech_type.key()
    }
}

/// Outcome of [`validate_devices`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceValidation {
    /// Accepted devices in input order.
    pub devices: Vec<RawDevice>,
    /// Every problem found, in input order.
    pub issues: Vec<ValidationError>,
}

impl DeviceValidation {
    /// Issues with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &ValidationError> {
        self.issues
            .iter()
            .filter(|e| e.severity == Severity::Error)
    }

    /// Issues with [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &ValidationError> {
        self.issues
            .iter()
            .filter(|e| e.severity == Severity::Warning)
    }

    /// Returns `true` if any issue blocks generation.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// Validate a raw device list.
pub fn validate_devices(devices: &[Value]) -> DeviceValidation {
    let mut out = DeviceValidation::default();
    // id → name of the first device that claimed it
    let mut seen_ids: HashMap<u32, String> = HashMap::new();

    for (idx, dev) in devices.iter().enumerate() {
        let loc = format!("devices[{idx}]");
        let mut push = |severity: Severity, message: String| {
            out.issues.push(ValidationError {
                message,
                location: loc.clone(),
                severity,
            });
        };

        let Value::Object(fields) = dev else {
            push(
                Severity::Error,
                "each entry of 'devices' must be an object".to_string(),
            );
            continue;
        };

        let name = display_name(fields.get("name"));

        // ── id ────────────────────────────────────────────────────────────
        let raw_id = match fields.get("id") {
            None | Some(Value::Null) => {
                push(
                    Severity::Error,
                    format!("device \"{name}\": missing or null id"),
                );
                continue;
            }
            Some(v) => v,
        };

        let id = match coerce_id(raw_id) {
            Ok(id) => id,
            Err(IdProblem::Negative(n)) => {
                push(
                    Severity::Error,
                    format!("device \"{name}\" (id={n}): id must not be negative"),
                );
                continue;
            }
            Err(IdProblem::OutOfRange) => {
                push(
                    Severity::Error,
                    format!(
                        "device \"{name}\" (id={raw_id}): id exceeds the maximum slot {MAX_SLOT}"
                    ),
                );
                continue;
            }
            Err(IdProblem::NotInteger) => {
                push(
                    Severity::Error,
                    format!(
                        "device \"{name}\" (id={raw_id}): id must be a non-negative integer"
                    ),
                );
                continue;
            }
        };

        if let Some(first) = seen_ids.get(&id) {
            push(
                Severity::Error,
                format!(
                    "device \"{name}\" (id={id}): duplicate id, previously used by \"{first}\""
                ),
            );
            continue;
        }
        // Claimed before the type checks: a skipped device still owns its slot.
        seen_ids.insert(id, name.clone());

        // ── type ──────────────────────────────────────────────────────────
        let raw_type = match fields.get("type") {
            None | Some(Value::Null) => {
                push(
                    Severity::Error,
                    format!("device \"{name}\" (id={id}): missing or null type (untyped device)"),
                );
                continue;
            }
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        let type_key = raw_type.to_lowercase();

        if is_non_mechanism(&type_key) {
            push(
                Severity::Warning,
                format!(
                    "device \"{name}\" (id={id}): type \"{raw_type}\" is not a mechanism, skipped"
                ),
            );
            continue;
        }

        let Some(mech_type) = MechType::from_key(&type_key) else {
            push(
                Severity::Error,
                format!("device \"{name}\" (id={id}): unsupported type \"{raw_type}\""),
            );
            continue;
        };

        out.devices.push(RawDevice {
            id,
            name,
            mech_type,
            raw_type,
        });
    }

    out
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum IdProblem {
    NotInteger,
    /// Carries the offending value as written.
    Negative(String),
    OutOfRange,
}

/// Coerce a JSON id into a slot number.
///
/// Accepts integers, integral floats and strings holding a decimal integer.
fn coerce_id(value: &Value) -> Result<u32, IdProblem> {
    let n: i128 = match value {
        Value::Number(num) => {
            if let Some(u) = num.as_u64() {
                i128::from(u)
            } else if let Some(i) = num.as_i64() {
                i128::from(i)
            } else {
                match num.as_f64() {
                    Some(f) if f.is_finite() && f.fract() == 0.0 => {
                        if f < 0.0 {
                            return Err(IdProblem::Negative((f as i128).to_string()));
                        }
                        if f > f64::from(MAX_SLOT) {
                            return Err(IdProblem::OutOfRange);
                        }
                        f as i128
                    }
                    _ => return Err(IdProblem::NotInteger),
                }
            }
        }
        Value::String(s) => parse_decimal(s)?,
        _ => return Err(IdProblem::NotInteger),
    };

    if n < 0 {
        return Err(IdProblem::Negative(n.to_string()));
    }
    match u32::try_from(n) {
        Ok(id) if id <= MAX_SLOT => Ok(id),
        _ => Err(IdProblem::OutOfRange),
    }
}

/// Decimal integer text with an optional sign. All-digit text too long to
/// parse is out of range rather than malformed.
fn parse_decimal(text: &str) -> Result<i128, IdProblem> {
    let s = text.trim();
    let negative = s.starts_with('-');
    let digits = s.strip_prefix(|c| c == '-' || c == '+').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdProblem::NotInteger);
    }
    s.parse().map_err(|_| {
        if negative {
            IdProblem::Negative(s.to_string())
        } else {
            IdProblem::OutOfRange
        }
    })
}

fn display_name(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => UNNAMED.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
