//! Kernel SVM decision functions evaluated from exported support vectors.

use super::{BoundaryClassifier, IdentityClassifier};
use crate::error::{AuthError, AuthResult};
use ndarray::{Array1, Array2, ArrayView1};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Kernel {
    Rbf { gamma: f64 },
    Linear,
}

impl Kernel {
    fn eval(&self, sv: ArrayView1<f64>, x: &Array1<f64>) -> f64 {
        match self {
            Kernel::Rbf { gamma } => {
                let sq: f64 = sv.iter().zip(x.iter()).map(|(a, b)| (a - b).powi(2)).sum();
                (-gamma * sq).exp()
            }
            Kernel::Linear => sv.dot(x),
        }
    }
}

/// Serialized form: `Σ dual_coef[i] · K(support_vectors[i], x) + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvmArtifact {
    pub kernel: Kernel,
    pub support_vectors: Vec<Vec<f64>>,
    pub dual_coef: Vec<f64>,
    pub intercept: f64,
}

/// Validated decision function ready for evaluation.
#[derive(Debug, Clone)]
pub struct SvmDecision {
    kernel: Kernel,
    support_vectors: Array2<f64>,
    dual_coef: Array1<f64>,
    intercept: f64,
}

impl SvmDecision {
    pub fn from_artifact(artifact: SvmArtifact) -> AuthResult<Self> {
        let n = artifact.support_vectors.len();
        if n == 0 {
            return Err(AuthError::InvalidModel("SVM has no support vectors".into()));
        }
        if artifact.dual_coef.len() != n {
            return Err(AuthError::dimension("SVM dual coefficients", n, artifact.dual_coef.len()));
        }
        let dim = artifact.support_vectors[0].len();
        let mut flat = Vec::with_capacity(n * dim);
        for sv in &artifact.support_vectors {
            if sv.len() != dim {
                return Err(AuthError::dimension("SVM support vector", dim, sv.len()));
            }
            flat.extend_from_slice(sv);
        }
        let support_vectors = Array2::from_shape_vec((n, dim), flat)
            .map_err(|e| AuthError::InvalidModel(e.to_string()))?;
        Ok(Self {
            kernel: artifact.kernel,
            support_vectors,
            dual_coef: Array1::from(artifact.dual_coef),
            intercept: artifact.intercept,
        })
    }

    pub fn dim(&self) -> usize {
        self.support_vectors.ncols()
    }

    pub fn decision(&self, x: &[f64]) -> f64 {
        let x = Array1::from(x.to_vec());
        let kernel_sum: f64 = self
            .support_vectors
            .rows()
            .into_iter()
            .zip(self.dual_coef.iter())
            .map(|(sv, coef)| coef * self.kernel.eval(sv, &x))
            .sum();
        kernel_sum + self.intercept
    }
}

/// One-class SVM boundary around a single user's genuine samples.
#[derive(Debug, Clone)]
pub struct OneClassSvm {
    decision: SvmDecision,
}

impl OneClassSvm {
    pub fn from_artifact(artifact: SvmArtifact) -> AuthResult<Self> {
        Ok(Self {
            decision: SvmDecision::from_artifact(artifact)?,
        })
    }

    pub fn dim(&self) -> usize {
        self.decision.dim()
    }
}

impl BoundaryClassifier for OneClassSvm {
    fn decision_function(&self, x: &[f64]) -> f64 {
        self.decision.decision(x)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSvm {
    pub label: String,
    #[serde(flatten)]
    pub svm: SvmArtifact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneVsRestArtifact {
    pub classes: Vec<LabeledSvm>,
}

/// Multi-user classifier: one decision function per enrolled user, highest wins.
#[derive(Debug, Clone)]
pub struct OneVsRestSvm {
    classes: Vec<(String, SvmDecision)>,
}

impl OneVsRestSvm {
    pub fn from_artifact(artifact: OneVsRestArtifact) -> AuthResult<Self> {
        if artifact.classes.is_empty() {
            return Err(AuthError::InvalidModel("identity classifier has no classes".into()));
        }
        let classes = artifact
            .classes
            .into_iter()
            .map(|c| -> AuthResult<(String, SvmDecision)> {
                Ok((c.label, SvmDecision::from_artifact(c.svm)?))
            })
            .collect::<AuthResult<Vec<_>>>()?;
        let dim = classes[0].1.dim();
        if let Some((label, d)) = classes.iter().find(|(_, d)| d.dim() != dim) {
            return Err(AuthError::dimension(format!("class {label}"), dim, d.dim()));
        }
        Ok(Self { classes })
    }

    pub fn dim(&self) -> usize {
        self.classes[0].1.dim()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|(l, _)| l.as_str())
    }
}

impl IdentityClassifier for OneVsRestSvm {
    fn predict(&self, x: &[f64]) -> &str {
        let mut best = &self.classes[0];
        let mut best_score = best.1.decision(x);
        for class in &self.classes[1..] {
            let score = class.1.decision(x);
            if score > best_score {
                best = class;
                best_score = score;
            }
        }
        &best.0
    }
}
