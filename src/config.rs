//! Service configuration: model locations, fusion policy, logging.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Root of the one-shot model bundles (keystroke/, tap/, swipe/, motion/)
    pub model_dir: PathBuf,
    /// One-shot decision fusion
    pub fusion: FusionConfig,
    /// Continuous session monitoring
    pub continuous: ContinuousConfig,
    /// Logging
    pub log: LogConfig,
}

/// What a present modality with too little data contributes to one-shot fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientDataPolicy {
    /// Leave the modality out of the average.
    Exclude,
    /// Count it as a 0.0 score (legacy behaviour; biases confidence downward).
    ZeroScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Mean score at or above this authenticates (0.0–1.0)
    pub acceptance_threshold: f64,
    pub insufficient_data: InsufficientDataPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuousConfig {
    /// Fraction of same-user votes at or above this keeps the session
    pub acceptance_threshold: f64,
    /// Optional identity models (motion.json, touch.json)
    pub model_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            fusion: FusionConfig::default(),
            continuous: ContinuousConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.6,
            insufficient_data: InsufficientDataPolicy::Exclude,
        }
    }
}

impl Default for ContinuousConfig {
    fn default() -> Self {
        Self {
            acceptance_threshold: 0.6,
            model_dir: PathBuf::from("models/continuous"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl AuthConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<AuthConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let c: AuthConfig =
            serde_json::from_str(r#"{"fusion": {"insufficient_data": "zero_score"}}"#).unwrap();
        assert_eq!(c.fusion.insufficient_data, InsufficientDataPolicy::ZeroScore);
        assert_eq!(c.fusion.acceptance_threshold, 0.6);
        assert_eq!(c.model_dir, PathBuf::from("models"));
        assert!(c.log.json);
    }
}
