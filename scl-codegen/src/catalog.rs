//! Mechanism type catalog
//!
//! The closed set of device types the generator understands, each bound to a
//! static [`TypeInfo`] capability record, plus the simulator default tables
//! emitted into `DB_SimConfig`.

use serde::Serialize;

// ── Mechanism types ──────────────────────────────────────────────────────────

/// A mechanism type recognised for full code generation.
///
/// Variant order is the canonical emission order used by every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MechType {
    Redler,
    Noria,
    Gate2P,
    Fan,
}

impl MechType {
    /// All mechanism types in canonical order.
    pub const ALL: [MechType; 4] = [
        MechType::Redler,
        MechType::Noria,
        MechType::Gate2P,
        MechType::Fan,
    ];

    /// Look up a type by its lowercase key (`"noria"`, `"gate2p"`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    /// Normalised lowercase key.
    pub fn key(self) -> &'static str {
        self.info().key
    }

    /// Static capability record for this type.
    pub fn info(self) -> &'static TypeInfo {
        match self {
            MechType::Redler => &REDLER,
            MechType::Noria => &NORIA,
            MechType::Gate2P => &GATE2P,
            MechType::Fan => &FAN,
        }
    }

    /// Size constant holding the upper bound of this type's array.
    pub fn count_constant(self) -> SizeConstant {
        match self {
            MechType::Redler => SizeConstant::RedlersCount,
            MechType::Noria => SizeConstant::NoriasCount,
            MechType::Gate2P => SizeConstant::Gates2pCount,
            MechType::Fan => SizeConstant::FansCount,
        }
    }

    /// Whether a simulator exists for this type.
    pub fn has_simulator(self) -> bool {
        self.info().simulator.is_some()
    }
}

impl std::fmt::Display for MechType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.info().array_name)
    }
}

// ── Capability records ───────────────────────────────────────────────────────

/// Target-side metadata for one mechanism type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// Lowercase input key.
    pub key: &'static str,
    /// `DeviceType` tag written into `Mechs[]`.
    pub tia_type: &'static str,
    /// UDT of the typed array element.
    pub udt: &'static str,
    /// Name of the typed array in every data block.
    pub array_name: &'static str,
    /// `None` when no simulator function block exists for the type.
    pub simulator: Option<SimulatorInfo>,
}

/// Simulator UDTs and the default configuration for one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatorInfo {
    pub state_udt: &'static str,
    pub config_udt: &'static str,
    /// Ordered `(field, value)` pairs written for every device of the type.
    pub config_defaults: &'static [(&'static str, &'static str)],
}

static REDLER: TypeInfo = TypeInfo {
    key: "redler",
    tia_type: "TYPE_REDLER",
    udt: "UDT_Redler",
    array_name: "Redler",
    simulator: Some(SimulatorInfo {
        state_udt: "UDT_SimRedlerState",
        config_udt: "UDT_SimRedlerConfig",
        config_defaults: REDLER_SIM_DEFAULTS,
    }),
};

static NORIA: TypeInfo = TypeInfo {
    key: "noria",
    tia_type: "TYPE_NORIA",
    udt: "UDT_Noria",
    array_name: "Noria",
    simulator: Some(SimulatorInfo {
        state_udt: "UDT_SimNoriaState",
        config_udt: "UDT_SimNoriaConfig",
        config_defaults: NORIA_SIM_DEFAULTS,
    }),
};

// FC_SimGate2P does not exist in the PLC project yet.
static GATE2P: TypeInfo = TypeInfo {
    key: "gate2p",
    tia_type: "TYPE_GATE2P",
    udt: "UDT_Gate2P",
    array_name: "Gate2P",
    simulator: None,
};

static FAN: TypeInfo = TypeInfo {
    key: "fan",
    tia_type: "TYPE_FAN",
    udt: "UDT_Fan",
    array_name: "Fan",
    simulator: Some(SimulatorInfo {
        state_udt: "UDT_SimFanState",
        config_udt: "UDT_SimFanConfig",
        config_defaults: FAN_SIM_DEFAULTS,
    }),
};

// ── Simulator defaults ───────────────────────────────────────────────────────

const REDLER_SIM_DEFAULTS: &[(&str, &str)] = &[
    ("Enable", "TRUE"),
    ("StartupTime_ms", "3000"),
    ("StopTime_ms", "2000"),
    ("SimFault_Breaker", "FALSE"),
    ("FaultTime_Breaker_ms", "10000"),
    ("SimFault_Overflow", "FALSE"),
    ("FaultTime_Overflow_ms", "15000"),
    ("ManualReset", "FALSE"),
];

const NORIA_SIM_DEFAULTS: &[(&str, &str)] = &[
    ("Enable", "TRUE"),
    ("StartupTime_ms", "4000"),
    ("StopTime_ms", "3000"),
    ("SimFault_Breaker", "FALSE"),
    ("FaultTime_Breaker_ms", "10000"),
    ("SimFault_Alignment", "FALSE"),
    ("FaultTime_Alignment_ms", "20000"),
    ("SimFault_Overflow", "FALSE"),
    ("FaultTime_Overflow_ms", "15000"),
    ("ManualReset", "FALSE"),
];

const FAN_SIM_DEFAULTS: &[(&str, &str)] = &[
    ("Enable", "TRUE"),
    ("StartupTime_ms", "3000"),
    ("StopTime_ms", "2000"),
    ("SimFault_Breaker", "FALSE"),
    ("FaultTime_Breaker_ms", "10000"),
    ("ManualReset", "FALSE"),
];

// ── Non-mechanisms ───────────────────────────────────────────────────────────

/// Valid input types that are deliberately left out of generation.
pub const NON_MECHANISM_TYPES: &[&str] = &["silo", "sensor", "label"];

/// Returns `true` if `key` (lowercase) names a recognised non-mechanism.
pub fn is_non_mechanism(key: &str) -> bool {
    NON_MECHANISM_TYPES.contains(&key)
}

// ── Size constants ───────────────────────────────────────────────────────────

/// PLC constants bounding the generated arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SizeConstant {
    #[serde(rename = "MECHS_COUNT")]
    MechsCount,
    #[serde(rename = "REDLERS_COUNT")]
    RedlersCount,
    #[serde(rename = "NORIAS_COUNT")]
    NoriasCount,
    #[serde(rename = "GATES2P_COUNT")]
    Gates2pCount,
    #[serde(rename = "FANS_COUNT")]
    FansCount,
}

impl SizeConstant {
    /// Every constant, in report order.
    pub const ALL: [SizeConstant; 5] = [
        SizeConstant::MechsCount,
        SizeConstant::RedlersCount,
        SizeConstant::NoriasCount,
        SizeConstant::Gates2pCount,
        SizeConstant::FansCount,
    ];

    /// Name as declared in the PLC tag table.
    pub fn name(self) -> &'static str {
        match self {
            SizeConstant::MechsCount => "MECHS_COUNT",
            SizeConstant::RedlersCount => "REDLERS_COUNT",
            SizeConstant::NoriasCount => "NORIAS_COUNT",
            SizeConstant::Gates2pCount => "GATES2P_COUNT",
            SizeConstant::FansCount => "FANS_COUNT",
        }
    }
}

impl std::fmt::Display for SizeConstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
