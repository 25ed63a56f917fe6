//! ONNX Runtime inference for the keystroke embedding. Input: [1, window, channels] f32,
//! output: [1, embedding_dim].

use super::Embedder;
use crate::error::{AuthError, AuthResult};
use ndarray::Array2;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;

/// `Session::run` needs exclusive access, so concurrent requests queue on the lock.
pub struct OnnxEmbedder {
    session: Mutex<Session>,
}

impl OnnxEmbedder {
    /// Load the model. Unlike optional models, a missing or invalid file is an error.
    pub fn load(path: &Path) -> AuthResult<Self> {
        let session = Session::builder()
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| AuthError::MalformedArtifact {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        tracing::debug!(path = %path.display(), "ONNX embedding loaded");
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Embedder for OnnxEmbedder {
    fn embed(&self, sequence: &Array2<f64>) -> AuthResult<Vec<f64>> {
        let (rows, cols) = sequence.dim();
        let shape = vec![1i64, rows as i64, cols as i64];
        let data: Vec<f32> = sequence.iter().map(|v| *v as f32).collect();
        let input = Tensor::from_array((shape, data))
            .map_err(|e| AuthError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| AuthError::Inference("ONNX session lock poisoned".into()))?;
        let outputs = session
            .run(ort::inputs![input])
            .map_err(|e| AuthError::Inference(e.to_string()))?;
        let (_, values) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| AuthError::Inference(e.to_string()))?;
        let embedding: Vec<f64> = values.iter().map(|v| f64::from(*v)).collect();
        if embedding.is_empty() {
            return Err(AuthError::Inference("empty embedding".into()));
        }
        Ok(embedding)
    }
}
