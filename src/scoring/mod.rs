//! Per-modality scorers: feature vector → match confidence in [0, 1].

pub mod boundary;
pub mod keystroke;

pub use keystroke::KeystrokeSubscores;

use crate::error::{AuthError, AuthResult};
use crate::features::{FeatureSchema, FeatureVector};
use crate::model::ModelBundles;

/// Score a one-shot feature vector with its modality's bundle.
pub fn score(bundles: &ModelBundles, features: &FeatureVector) -> AuthResult<f64> {
    match features.schema() {
        FeatureSchema::Keystroke => keystroke::score(&bundles.keystroke, features),
        FeatureSchema::Tap => boundary::score(&bundles.tap, features),
        FeatureSchema::Swipe => boundary::score(&bundles.swipe, features),
        FeatureSchema::Motion => boundary::score(&bundles.motion, features),
        other => Err(AuthError::Inference(format!(
            "{other:?} features are not scored by one-shot bundles"
        ))),
    }
}
