//! Behavioral authentication: passive biometric scoring and decision fusion.
//!
//! Modular structure:
//! - [`payload`]: Request payloads (keystroke, tap, swipe, motion, touch)
//! - [`features`]: Per-modality fixed-length feature extraction
//! - [`model`]: Trained model artifacts and read-only bundles
//! - [`scoring`]: Per-modality match scores in [0, 1]
//! - [`fusion`]: One-shot and continuous decision fusion
//! - [`logging`]: Structured JSON logging

pub mod config;
pub mod error;
pub mod features;
pub mod fusion;
pub mod logging;
pub mod math;
pub mod model;
pub mod payload;
pub mod scoring;

pub use config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use features::{FeatureSchema, FeatureVector, Modality};
pub use fusion::{AuthVerdict, ContinuousFusionEngine, ContinuousVerdict, DecisionFusionEngine};
pub use logging::StructuredLogger;
pub use model::{ContinuousModels, ModelBundles};
pub use payload::BehavioralPayload;
