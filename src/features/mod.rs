//! Per-modality feature extraction: raw event sequences → fixed-length vectors.
//!
//! Every extractor returns `None` when its input is below the modality's
//! minimum-sample threshold; callers skip the modality instead of scoring it.

pub mod keystroke;
pub mod motion;
pub mod swipe;
pub mod tap;
pub mod touch;

use crate::error::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral signal source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    Keystroke,
    Tap,
    Swipe,
    Motion,
    Touch,
}

impl Modality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Keystroke => "keystroke",
            Modality::Tap => "tap",
            Modality::Swipe => "swipe",
            Modality::Motion => "motion",
            Modality::Touch => "touch",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout of a feature vector. Lengths are fixed per schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSchema {
    /// 30 padded hold times followed by 30 padded inter-key delays
    Keystroke,
    /// mean reaction time, mean distance
    Tap,
    /// mean duration, mean speed, mean distance
    Swipe,
    /// (mean, std) of accelerometer x/y/z then gyroscope x/y/z
    Motion,
    /// accelerometer means x/y/z, stds x/y/z, signal magnitude area
    ContinuousMotion,
    /// press interval mean, interval std, press count
    Touch,
}

impl FeatureSchema {
    pub const fn len(&self) -> usize {
        match self {
            FeatureSchema::Keystroke => 2 * keystroke::WINDOW,
            FeatureSchema::Tap => 2,
            FeatureSchema::Swipe => 3,
            FeatureSchema::Motion => 12,
            FeatureSchema::ContinuousMotion => 7,
            FeatureSchema::Touch => 3,
        }
    }

    pub const fn modality(&self) -> Modality {
        match self {
            FeatureSchema::Keystroke => Modality::Keystroke,
            FeatureSchema::Tap => Modality::Tap,
            FeatureSchema::Swipe => Modality::Swipe,
            FeatureSchema::Motion | FeatureSchema::ContinuousMotion => Modality::Motion,
            FeatureSchema::Touch => Modality::Touch,
        }
    }
}

/// Fixed-size feature vector for model input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    schema: FeatureSchema,
    values: Vec<f64>,
}

impl FeatureVector {
    /// Build a vector, checking its length against the schema.
    pub fn new(schema: FeatureSchema, values: Vec<f64>) -> AuthResult<Self> {
        if values.len() != schema.len() {
            return Err(AuthError::dimension(
                format!("{schema:?} feature vector"),
                schema.len(),
                values.len(),
            ));
        }
        Ok(Self { schema, values })
    }

    /// Extractors always produce schema-length vectors.
    pub(crate) fn from_schema(schema: FeatureSchema, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), schema.len());
        Self { schema, values }
    }

    pub fn schema(&self) -> FeatureSchema {
        self.schema
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// False when an overflowing input pushed any value to inf or NaN.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}
