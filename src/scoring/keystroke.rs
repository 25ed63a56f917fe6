//! Keystroke ensemble: embed → standardize → {boundary, neighbor, embedding-mean} → average.
//!
//! Each stage is a free function over immutable model state so it can be
//! exercised on its own.

use crate::error::{AuthError, AuthResult};
use crate::features::{keystroke::WINDOW, FeatureSchema, FeatureVector};
use crate::math::{mean, squash};
use crate::model::{BoundaryClassifier, KeystrokeBundle, NearestNeighbors};
use ndarray::Array2;

/// Channels per key event in the embedding input (hold, delay).
pub const CHANNELS: usize = 2;

/// The three signals blended into the keystroke score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeystrokeSubscores {
    pub boundary: f64,
    pub neighbor: f64,
    pub embedding: f64,
}

impl KeystrokeSubscores {
    /// Unweighted mean of the three signals.
    pub fn blend(&self) -> f64 {
        (self.boundary + self.neighbor + self.embedding) / 3.0
    }
}

/// Row-major reshape of the 60-value vector into `WINDOW × CHANNELS`, the
/// layout the embedding was fitted on.
pub fn embedding_input(features: &FeatureVector) -> AuthResult<Array2<f64>> {
    if features.schema() != FeatureSchema::Keystroke {
        return Err(AuthError::dimension(
            "keystroke features",
            FeatureSchema::Keystroke.len(),
            features.len(),
        ));
    }
    Array2::from_shape_vec((WINDOW, CHANNELS), features.as_slice().to_vec())
        .map_err(|e| AuthError::Inference(e.to_string()))
}

pub fn boundary_score(boundary: &dyn BoundaryClassifier, standardized: &[f64]) -> f64 {
    squash(boundary.decision_function(standardized))
}

/// `exp(-mean distance)` to the nearest enrolled embeddings.
pub fn neighbor_score(neighbors: &NearestNeighbors, standardized: &[f64]) -> AuthResult<f64> {
    let distances = neighbors.kneighbors(standardized)?;
    Ok((-mean(&distances)).exp())
}

/// Mean activation of the raw embedding, clamped into [0, 1].
pub fn embedding_score(embedding: &[f64]) -> f64 {
    mean(embedding).clamp(0.0, 1.0)
}

pub fn subscores(bundle: &KeystrokeBundle, features: &FeatureVector) -> AuthResult<KeystrokeSubscores> {
    let input = embedding_input(features)?;
    let embedding = bundle.embedder.embed(&input)?;
    let standardized = bundle.scaler.transform(&embedding)?;
    Ok(KeystrokeSubscores {
        boundary: boundary_score(bundle.boundary.as_ref(), &standardized),
        neighbor: neighbor_score(&bundle.neighbors, &standardized)?,
        embedding: embedding_score(&embedding),
    })
}

pub fn score(bundle: &KeystrokeBundle, features: &FeatureVector) -> AuthResult<f64> {
    let sub = subscores(bundle, features)?;
    tracing::debug!(
        boundary = sub.boundary,
        neighbor = sub.neighbor,
        embedding = sub.embedding,
        "keystroke subscores"
    );
    Ok(sub.blend())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Embedder, NeighborsArtifact, StandardScaler};

    struct Fixed(f64);

    impl BoundaryClassifier for Fixed {
        fn decision_function(&self, _x: &[f64]) -> f64 {
            self.0
        }
    }

    struct Emits(Vec<f64>);

    impl Embedder for Emits {
        fn embed(&self, _sequence: &Array2<f64>) -> AuthResult<Vec<f64>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn blend_is_unweighted_mean() {
        let sub = KeystrokeSubscores {
            boundary: 0.2,
            neighbor: 0.8,
            embedding: 0.5,
        };
        assert_eq!(sub.blend(), 0.5);
    }

    #[test]
    fn reshape_pairs_consecutive_values() {
        let values: Vec<f64> = (0..60).map(f64::from).collect();
        let fv = FeatureVector::new(FeatureSchema::Keystroke, values).unwrap();
        let m = embedding_input(&fv).unwrap();
        assert_eq!(m.dim(), (30, 2));
        assert_eq!(m[[0, 0]], 0.0);
        assert_eq!(m[[0, 1]], 1.0);
        assert_eq!(m[[15, 0]], 30.0);
    }

    #[test]
    fn wrong_schema_rejected() {
        let fv = FeatureVector::new(FeatureSchema::Tap, vec![1.0, 2.0]).unwrap();
        assert!(embedding_input(&fv).is_err());
    }

    #[test]
    fn neighbor_score_decays_with_distance() {
        let nn = NearestNeighbors::from_artifact(NeighborsArtifact {
            n_neighbors: 2,
            points: vec![vec![0.0], vec![2.0], vec![50.0]],
        })
        .unwrap();
        assert_eq!(neighbor_score(&nn, &[1.0]).unwrap(), (-1.0f64).exp());
        assert!(neighbor_score(&nn, &[20.0]).unwrap() < neighbor_score(&nn, &[1.0]).unwrap());
    }

    #[test]
    fn boundary_and_embedding_scores() {
        assert_eq!(boundary_score(&Fixed(0.0), &[]), 0.5);
        assert_eq!(embedding_score(&[0.25, 0.75]), 0.5);
        assert_eq!(embedding_score(&[3.0, 5.0]), 1.0);
        assert_eq!(embedding_score(&[-1.0]), 0.0);
    }

    #[test]
    fn large_embedding_mean_is_capped_in_blend() {
        // Embedding mean 4.0: unclamped, the blend would leave [0, 1].
        let embedding = vec![3.0, 5.0];
        let neighbors = NearestNeighbors::from_artifact(NeighborsArtifact {
            n_neighbors: 1,
            points: vec![embedding.clone()],
        })
        .unwrap();
        let bundle = KeystrokeBundle::new(
            Box::new(Emits(embedding)),
            StandardScaler::identity(2),
            Box::new(Fixed(0.0)),
            neighbors,
        )
        .unwrap();
        let fv = FeatureVector::new(FeatureSchema::Keystroke, vec![0.0; 60]).unwrap();

        let sub = subscores(&bundle, &fv).unwrap();
        assert_eq!(sub.boundary, 0.5);
        assert_eq!(sub.neighbor, 1.0);
        assert_eq!(sub.embedding, 1.0);

        let s = score(&bundle, &fv).unwrap();
        assert_eq!(s, (0.5 + 1.0 + 1.0) / 3.0);
        assert!(s < (0.5 + 1.0 + 4.0) / 3.0);
        assert!(s <= 1.0);
    }
}
