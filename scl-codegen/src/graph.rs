//! Device graph document intake
//!
//! Reads the uploaded `graph.json` and performs the structural checks that
//! must pass before any per-device validation runs.

use serde_json::{Map, Value};

/// Top-level structure of a device graph.
///
/// Device entries stay loosely typed; the validator decides what each one is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphDocument {
    pub devices: Vec<Value>,
    /// Type palette of the graph editor. Required, but not consulted.
    pub device_types: Vec<Value>,
}

/// The document is not a usable graph at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .messages.join("; "))]
pub struct StructuralError {
    pub messages: Vec<String>,
}

impl StructuralError {
    fn single(message: impl Into<String>) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }
}

impl GraphDocument {
    /// Parse a JSON string into a graph document.
    pub fn from_json(src: &str) -> Result<Self, StructuralError> {
        let value: Value = serde_json::from_str(src)
            .map_err(|e| StructuralError::single(format!("invalid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Check an already-parsed JSON value.
    ///
    /// Missing `devices` and `deviceTypes` are reported together.
    pub fn from_value(value: Value) -> Result<Self, StructuralError> {
        let Value::Object(mut root) = value else {
            return Err(StructuralError::single(
                "graph JSON must be an object",
            ));
        };

        let mut missing = Vec::new();
        for field in ["devices", "deviceTypes"] {
            if !root.contains_key(field) {
                missing.push(format!("missing field '{field}'"));
            }
        }
        if !missing.is_empty() {
            return Err(StructuralError { messages: missing });
        }

        let devices = match take(&mut root, "devices") {
            Value::Array(items) => items,
            _ => {
                return Err(StructuralError::single("field 'devices' must be an array"));
            }
        };
        let device_types = match take(&mut root, "deviceTypes") {
            Value::Array(items) => items,
            _ => Vec::new(),
        };

        Ok(Self {
            devices,
            device_types,
        })
    }
}

fn take(root: &mut Map<String, Value>, key: &str) -> Value {
    root.remove(key).unwrap_or(Value::Null)
}
