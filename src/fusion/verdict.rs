//! Verdicts returned to the request layer.

use serde::{Deserialize, Serialize};

pub const NO_USABLE_DATA: &str = "No usable behavioral data";
pub const INSUFFICIENT_DATA: &str = "Insufficient data";

/// `confidence >= threshold` authenticates; the threshold itself passes.
pub fn accepts(confidence: f64, threshold: f64) -> bool {
    confidence >= threshold
}

/// One-shot authentication result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthVerdict {
    pub authenticated: bool,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl AuthVerdict {
    /// Fail closed: no evidence never authenticates.
    pub fn no_usable_data() -> Self {
        Self {
            authenticated: false,
            confidence: 0.0,
            scores: None,
            reason: Some(NO_USABLE_DATA.to_string()),
        }
    }
}

/// Session-monitoring result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContinuousVerdict {
    pub authenticated: bool,
    pub anomaly: bool,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<Vec<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ContinuousVerdict {
    /// Fail open: a quiet window must not lock out an active session.
    pub fn insufficient_data() -> Self {
        Self {
            authenticated: true,
            anomaly: false,
            confidence: 1.0,
            votes: None,
            reason: Some(INSUFFICIENT_DATA.to_string()),
        }
    }
}
