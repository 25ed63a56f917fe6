//! Embedding exported as plain dense layers, for deployments without ONNX Runtime.

use super::Embedder;
use crate::error::{AuthError, AuthResult};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerActivation {
    Relu,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    /// `[out][in]`
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    pub activation: LayerActivation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseEmbedderArtifact {
    pub layers: Vec<DenseLayer>,
}

struct Layer {
    weights: Array2<f64>,
    bias: Array1<f64>,
    activation: LayerActivation,
}

/// Feed-forward embedding over the flattened (row-major) input sequence.
pub struct DenseEmbedder {
    layers: Vec<Layer>,
}

impl DenseEmbedder {
    pub fn from_artifact(artifact: DenseEmbedderArtifact) -> AuthResult<Self> {
        if artifact.layers.is_empty() {
            return Err(AuthError::InvalidModel("embedding has no layers".into()));
        }
        let mut layers = Vec::with_capacity(artifact.layers.len());
        let mut prev_out: Option<usize> = None;
        for (i, layer) in artifact.layers.into_iter().enumerate() {
            let rows = layer.weights.len();
            let cols = layer.weights.first().map_or(0, Vec::len);
            if rows == 0 || cols == 0 {
                return Err(AuthError::InvalidModel(format!("layer {i} has empty weights")));
            }
            if layer.bias.len() != rows {
                return Err(AuthError::dimension(format!("layer {i} bias"), rows, layer.bias.len()));
            }
            if let Some(expected) = prev_out {
                if cols != expected {
                    return Err(AuthError::dimension(format!("layer {i} input"), expected, cols));
                }
            }
            let mut flat = Vec::with_capacity(rows * cols);
            for row in &layer.weights {
                if row.len() != cols {
                    return Err(AuthError::dimension(format!("layer {i} weights"), cols, row.len()));
                }
                flat.extend_from_slice(row);
            }
            let weights = Array2::from_shape_vec((rows, cols), flat)
                .map_err(|e| AuthError::InvalidModel(e.to_string()))?;
            layers.push(Layer {
                weights,
                bias: Array1::from(layer.bias),
                activation: layer.activation,
            });
            prev_out = Some(rows);
        }
        Ok(Self { layers })
    }

    pub fn input_dim(&self) -> usize {
        self.layers[0].weights.ncols()
    }
}

impl Embedder for DenseEmbedder {
    fn embed(&self, sequence: &Array2<f64>) -> AuthResult<Vec<f64>> {
        let mut x: Array1<f64> = sequence.iter().copied().collect();
        if x.len() != self.input_dim() {
            return Err(AuthError::dimension("embedding input", self.input_dim(), x.len()));
        }
        for layer in &self.layers {
            x = layer.weights.dot(&x) + &layer.bias;
            if layer.activation == LayerActivation::Relu {
                x.mapv_inplace(|v| v.max(0.0));
            }
        }
        Ok(x.to_vec())
    }

    fn output_dim(&self) -> Option<usize> {
        self.layers.last().map(|l| l.weights.nrows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> DenseEmbedderArtifact {
        DenseEmbedderArtifact {
            layers: vec![
                DenseLayer {
                    weights: vec![vec![1.0, 1.0, 0.0, 0.0], vec![0.0, 0.0, 1.0, -1.0]],
                    bias: vec![0.0, 0.0],
                    activation: LayerActivation::Relu,
                },
                DenseLayer {
                    weights: vec![vec![0.5, 0.5]],
                    bias: vec![1.0],
                    activation: LayerActivation::Linear,
                },
            ],
        }
    }

    #[test]
    fn forward_pass_flattens_row_major() {
        let e = DenseEmbedder::from_artifact(artifact()).unwrap();
        let seq = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 5.0]).unwrap();
        // hidden = relu([3, -2]) = [3, 0]; out = 1.5 + 1
        assert_eq!(e.embed(&seq).unwrap(), vec![2.5]);
        assert_eq!(e.output_dim(), Some(1));
        assert_eq!(e.input_dim(), 4);
    }

    #[test]
    fn chained_layer_shapes_checked() {
        let mut a = artifact();
        a.layers[1].weights = vec![vec![1.0, 1.0, 1.0]];
        assert!(matches!(
            DenseEmbedder::from_artifact(a),
            Err(AuthError::DimensionMismatch { .. })
        ));
    }
}
