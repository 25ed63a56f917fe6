//! Trained model artifacts and the read-only bundles built from them.
//!
//! Artifacts are produced by the offline fitting pipeline and loaded once at
//! startup. Nothing here mutates after construction, so bundles are shared
//! across requests behind an `Arc` without locking.

mod bundle;
mod dense;
mod neighbors;
#[cfg(feature = "onnx")]
mod onnx;
mod scaler;
mod svm;

pub use bundle::{BoundaryBundle, ContinuousModels, KeystrokeBundle, ModelBundles};
pub use dense::{DenseEmbedder, DenseEmbedderArtifact, DenseLayer, LayerActivation};
pub use neighbors::{NearestNeighbors, NeighborsArtifact};
#[cfg(feature = "onnx")]
pub use onnx::OnnxEmbedder;
pub use scaler::StandardScaler;
pub use svm::{
    Kernel, LabeledSvm, OneClassSvm, OneVsRestArtifact, OneVsRestSvm, SvmArtifact, SvmDecision,
};

use crate::error::AuthResult;
use ndarray::Array2;

/// One-class model fitted on genuine samples. Larger decision values mean a
/// closer match to the enrolled user.
pub trait BoundaryClassifier: Send + Sync {
    fn decision_function(&self, x: &[f64]) -> f64;
}

/// Multi-user classifier used by session monitoring; predicts a user label.
pub trait IdentityClassifier: Send + Sync {
    fn predict(&self, x: &[f64]) -> &str;
}

/// Learned transform from a raw keystroke sequence (window × channels) to a
/// fixed-length embedding.
pub trait Embedder: Send + Sync {
    fn embed(&self, sequence: &Array2<f64>) -> AuthResult<Vec<f64>>;

    /// Embedding length when known before inference.
    fn output_dim(&self) -> Option<usize> {
        None
    }
}
