//! Capability payload types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque physical package identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    pub identifier: String,
}

impl Footprint {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// Generic two-pad SMD package of the given imperial size.
    pub fn smd_two_pin(size: SmdSize) -> Self {
        Self::new(format!("SMD_TwoPin_{}", size.code()))
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// Imperial chip sizes for two-pad SMD parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SmdSize {
    I0402,
    I0603,
    I0805,
    I1206,
}

impl SmdSize {
    pub fn code(&self) -> &'static str {
        match self {
            SmdSize::I0402 => "0402",
            SmdSize::I0603 => "0603",
            SmdSize::I0805 => "0805",
            SmdSize::I1206 => "1206",
        }
    }
}

/// Physical pin identifier ("1", "2", "S", "TN", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(pub String);

impl PinId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PinId {
    fn from(s: &str) -> Self {
        PinId(s.to_string())
    }
}

impl From<String> for PinId {
    fn from(s: String) -> Self {
        PinId(s)
    }
}

impl From<u32> for PinId {
    fn from(n: u32) -> Self {
        PinId(n.to_string())
    }
}

/// Opaque electrical parameter carried for downstream tooling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Parameter {
    Constant { value: f64 },
    Range { min: f64, max: f64 },
    Tbd,
}

impl Parameter {
    pub fn constant(value: f64) -> Self {
        Parameter::Constant { value }
    }

    pub fn range(min: f64, max: f64) -> Self {
        Parameter::Range { min, max }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Constant { value } => f.write_str(&engineering(*value)),
            Parameter::Range { min, max } => {
                write!(f, "{}..{}", engineering(*min), engineering(*max))
            }
            Parameter::Tbd => f.write_str("TBD"),
        }
    }
}

/// Format a value with an SI prefix: `1000.0` -> `1k`, `1.5e-8` -> `15n`.
fn engineering(value: f64) -> String {
    const PREFIXES: [(f64, &str); 8] = [
        (1e9, "G"),
        (1e6, "M"),
        (1e3, "k"),
        (1.0, ""),
        (1e-3, "m"),
        (1e-6, "u"),
        (1e-9, "n"),
        (1e-12, "p"),
    ];

    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs();
    let (scale, prefix) = PREFIXES
        .iter()
        .copied()
        .find(|(scale, _)| magnitude >= *scale * 0.999_999)
        .unwrap_or((1e-12, "p"));

    let scaled = format!("{:.3}", value / scale);
    let trimmed = scaled.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", trimmed, prefix)
}
