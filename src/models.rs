//! Shared value types for pace, time and distance calculations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit of distance a pace or split refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Mile,
    Km,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Mile
    }
}

impl Unit {
    /// Long name used in "per mile" / "per kilometer" displays
    pub fn long_name(&self) -> &'static str {
        match self {
            Unit::Mile => "mile",
            Unit::Km => "kilometer",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Mile => write!(f, "mile"),
            Unit::Km => write!(f, "km"),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mile" | "miles" | "mi" => Ok(Unit::Mile),
            "km" | "kms" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => Ok(Unit::Km),
            _ => Err(format!("Invalid unit: {}", s)),
        }
    }
}

/// A duration decomposed into hours, minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeComponents {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Always `H:MM:SS`, the shape used for finish-time projections
impl fmt::Display for TimeComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// A per-unit pace decomposed into minutes and seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaceComponents {
    pub minutes: i64,
    pub seconds: i64,
}

impl fmt::Display for PaceComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.minutes, self.seconds)
    }
}

/// A display-ready time keyed by distance label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledTime {
    pub label: String,
    pub time: String,
}

impl LabeledTime {
    pub fn new(label: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            time: time.into(),
        }
    }
}
