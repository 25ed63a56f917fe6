//! Error types for model loading and per-modality scoring.

use std::path::PathBuf;
use thiserror::Error;

use crate::features::Modality;

/// Errors raised while building engines or scoring a single modality.
///
/// Only construction-time variants ever reach callers of the engines;
/// scoring errors are absorbed per modality.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("model for {modality} unavailable at {path}: {reason}")]
    ModelUnavailable {
        modality: Modality,
        path: PathBuf,
        reason: String,
    },

    #[error("malformed artifact {path}: {reason}")]
    MalformedArtifact { path: PathBuf, reason: String },

    #[error("{context}: expected dimension {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid model: {0}")]
    InvalidModel(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuthError {
    pub(crate) fn dimension(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        AuthError::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
