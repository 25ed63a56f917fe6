//! Per-modality model bundles and their on-disk layout.
//!
//! ```text
//! <model_dir>/keystroke/{embedding.onnx | embedding.json, scaler.json, boundary.json, neighbors.json}
//! <model_dir>/tap/boundary.json
//! <model_dir>/swipe/boundary.json
//! <model_dir>/motion/{scaler.json, boundary.json}
//! <continuous_dir>/{motion.json, touch.json}
//! ```

use super::{
    BoundaryClassifier, DenseEmbedder, DenseEmbedderArtifact, Embedder, IdentityClassifier,
    NearestNeighbors, NeighborsArtifact, OneClassSvm, OneVsRestArtifact, OneVsRestSvm,
    StandardScaler, SvmArtifact,
};
use crate::error::{AuthError, AuthResult};
use crate::features::{keystroke, FeatureSchema, Modality};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

fn read_json<T: DeserializeOwned>(modality: Modality, path: &Path) -> AuthResult<T> {
    let raw = std::fs::read_to_string(path).map_err(|e| AuthError::ModelUnavailable {
        modality,
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&raw).map_err(|e| AuthError::MalformedArtifact {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Attach the artifact path to validation errors raised while building a model.
fn at<T>(path: &Path, built: AuthResult<T>) -> AuthResult<T> {
    built.map_err(|e| match e {
        AuthError::InvalidModel(reason) => AuthError::MalformedArtifact {
            path: path.to_path_buf(),
            reason,
        },
        e @ AuthError::DimensionMismatch { .. } => AuthError::MalformedArtifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
        other => other,
    })
}

fn expect_dim(path: &Path, what: &str, expected: usize, actual: usize) -> AuthResult<()> {
    if expected == actual {
        return Ok(());
    }
    Err(AuthError::MalformedArtifact {
        path: path.to_path_buf(),
        reason: format!("{what}: expected dimension {expected}, got {actual}"),
    })
}

fn load_scaler(modality: Modality, path: &Path) -> AuthResult<StandardScaler> {
    let scaler: StandardScaler = read_json(modality, path)?;
    at(path, scaler.validate())?;
    Ok(scaler)
}

fn load_svm(modality: Modality, path: &Path) -> AuthResult<OneClassSvm> {
    let artifact: SvmArtifact = read_json(modality, path)?;
    at(path, OneClassSvm::from_artifact(artifact))
}

fn load_identity(modality: Modality, path: &Path, dim: usize) -> AuthResult<OneVsRestSvm> {
    let artifact: OneVsRestArtifact = read_json(modality, path)?;
    let clf = at(path, OneVsRestSvm::from_artifact(artifact))?;
    expect_dim(path, "identity classifier", dim, clf.dim())?;
    Ok(clf)
}

#[cfg(feature = "onnx")]
fn load_onnx(path: &Path) -> AuthResult<Option<Box<dyn Embedder>>> {
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(Box::new(super::OnnxEmbedder::load(path)?)))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(path: &Path) -> AuthResult<Option<Box<dyn Embedder>>> {
    if path.exists() {
        warn!(path = %path.display(), "built without the onnx feature; ONNX embedding ignored");
    }
    Ok(None)
}

/// Embedding model, standardizer, one-class boundary and similarity index
/// for keystroke rhythm.
pub struct KeystrokeBundle {
    pub embedder: Box<dyn Embedder>,
    pub scaler: StandardScaler,
    pub boundary: Box<dyn BoundaryClassifier>,
    pub neighbors: NearestNeighbors,
}

impl KeystrokeBundle {
    pub fn new(
        embedder: Box<dyn Embedder>,
        scaler: StandardScaler,
        boundary: Box<dyn BoundaryClassifier>,
        neighbors: NearestNeighbors,
    ) -> AuthResult<Self> {
        if neighbors.dim() != scaler.dim() {
            return Err(AuthError::dimension("keystroke neighbor index", scaler.dim(), neighbors.dim()));
        }
        if let Some(out) = embedder.output_dim() {
            if out != scaler.dim() {
                return Err(AuthError::dimension("keystroke embedding", scaler.dim(), out));
            }
        }
        Ok(Self {
            embedder,
            scaler,
            boundary,
            neighbors,
        })
    }

    pub fn load(dir: &Path) -> AuthResult<Self> {
        let m = Modality::Keystroke;
        let onnx = dir.join("embedding.onnx");
        let dense = dir.join("embedding.json");
        let embedder: Box<dyn Embedder> = match load_onnx(&onnx)? {
            Some(e) => e,
            None if dense.exists() => {
                let artifact: DenseEmbedderArtifact = read_json(m, &dense)?;
                let e = at(&dense, DenseEmbedder::from_artifact(artifact))?;
                expect_dim(&dense, "embedding input", FeatureSchema::Keystroke.len(), e.input_dim())?;
                Box::new(e)
            }
            None => {
                return Err(AuthError::ModelUnavailable {
                    modality: m,
                    path: dense,
                    reason: "no usable embedding.onnx or embedding.json".into(),
                })
            }
        };

        let scaler_path = dir.join("scaler.json");
        let scaler = load_scaler(m, &scaler_path)?;
        let boundary_path = dir.join("boundary.json");
        let boundary = load_svm(m, &boundary_path)?;
        expect_dim(&boundary_path, "keystroke boundary", scaler.dim(), boundary.dim())?;
        let neighbors_path = dir.join("neighbors.json");
        let artifact: NeighborsArtifact = read_json(m, &neighbors_path)?;
        let neighbors = at(&neighbors_path, NearestNeighbors::from_artifact(artifact))?;

        at(dir, Self::new(embedder, scaler, Box::new(boundary), neighbors))
    }
}

/// A single boundary classifier, optionally preceded by a standardizer.
pub struct BoundaryBundle {
    pub scaler: Option<StandardScaler>,
    pub boundary: Box<dyn BoundaryClassifier>,
}

impl BoundaryBundle {
    pub fn new(boundary: Box<dyn BoundaryClassifier>, scaler: Option<StandardScaler>) -> Self {
        Self { scaler, boundary }
    }

    /// Load `boundary.json` (and `scaler.json` when `scaled`), checking both
    /// against the modality's feature length.
    pub fn load(dir: &Path, schema: FeatureSchema, scaled: bool) -> AuthResult<Self> {
        let m = schema.modality();
        let scaler = if scaled {
            let path = dir.join("scaler.json");
            let s = load_scaler(m, &path)?;
            expect_dim(&path, "scaler", schema.len(), s.dim())?;
            Some(s)
        } else {
            None
        };
        let path = dir.join("boundary.json");
        let boundary = load_svm(m, &path)?;
        expect_dim(&path, "boundary classifier", schema.len(), boundary.dim())?;
        Ok(Self::new(Box::new(boundary), scaler))
    }
}

/// Everything one-shot authentication needs. All four modalities are required.
pub struct ModelBundles {
    pub keystroke: KeystrokeBundle,
    pub tap: BoundaryBundle,
    pub swipe: BoundaryBundle,
    pub motion: BoundaryBundle,
}

impl ModelBundles {
    /// Load every bundle under `model_dir`, failing on the first missing or
    /// malformed artifact.
    pub fn load(model_dir: &Path) -> AuthResult<Self> {
        let bundles = Self {
            keystroke: KeystrokeBundle::load(&model_dir.join("keystroke"))?,
            tap: BoundaryBundle::load(&model_dir.join("tap"), FeatureSchema::Tap, false)?,
            swipe: BoundaryBundle::load(&model_dir.join("swipe"), FeatureSchema::Swipe, false)?,
            motion: BoundaryBundle::load(&model_dir.join("motion"), FeatureSchema::Motion, true)?,
        };
        info!(
            model_dir = %model_dir.display(),
            keystroke_window = keystroke::WINDOW,
            "model bundles loaded"
        );
        Ok(bundles)
    }
}

/// Optional identity classifiers for session monitoring. A model that fails to
/// load leaves its modality disabled for the lifetime of the process.
pub struct ContinuousModels {
    pub motion: Option<Box<dyn IdentityClassifier>>,
    pub touch: Option<Box<dyn IdentityClassifier>>,
}

impl ContinuousModels {
    pub fn new(
        motion: Option<Box<dyn IdentityClassifier>>,
        touch: Option<Box<dyn IdentityClassifier>>,
    ) -> Self {
        Self { motion, touch }
    }

    pub fn load(dir: &Path) -> Self {
        Self {
            motion: Self::load_optional(
                Modality::Motion,
                dir.join("motion.json"),
                FeatureSchema::ContinuousMotion,
            ),
            touch: Self::load_optional(Modality::Touch, dir.join("touch.json"), FeatureSchema::Touch),
        }
    }

    fn load_optional(
        modality: Modality,
        path: PathBuf,
        schema: FeatureSchema,
    ) -> Option<Box<dyn IdentityClassifier>> {
        match load_identity(modality, &path, schema.len()) {
            Ok(clf) => {
                info!(
                    %modality,
                    path = %path.display(),
                    classes = clf.labels().count(),
                    "continuous model loaded"
                );
                Some(Box::new(clf))
            }
            Err(e) => {
                warn!(%modality, error = %e, "continuous model unavailable; modality disabled");
                None
            }
        }
    }

    pub fn enabled(&self, modality: Modality) -> bool {
        match modality {
            Modality::Motion => self.motion.is_some(),
            Modality::Touch => self.touch.is_some(),
            _ => false,
        }
    }
}
