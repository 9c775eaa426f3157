//! Risk level model

use std::fmt;

use serde::Serialize;

/// Scores below this are SAFE; at or above it, WARNING.
pub const WARNING_THRESHOLD: f64 = 0.7;

/// Scores at or above this are DANGER.
pub const DANGER_THRESHOLD: f64 = 2.0;

/// Discrete flood risk classification, ordered SAFE < WARNING < DANGER.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    /// Map a risk score onto its band. Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score < WARNING_THRESHOLD {
            RiskLevel::Safe
        } else if score < DANGER_THRESHOLD {
            RiskLevel::Warning
        } else {
            RiskLevel::Danger
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskLevel::Safe => "SAFE",
            RiskLevel::Warning => "WARNING",
            RiskLevel::Danger => "DANGER",
        };
        write!(f, "{}", name)
    }
}
