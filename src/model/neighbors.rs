use crate::error::{AuthError, AuthResult};
use crate::math::euclidean;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborsArtifact {
    pub n_neighbors: usize,
    /// Enrolled genuine embeddings, already standardized.
    pub points: Vec<Vec<f64>>,
}

/// Brute-force euclidean k-nearest-neighbor index over enrolled samples.
#[derive(Debug, Clone)]
pub struct NearestNeighbors {
    n_neighbors: usize,
    points: Vec<Vec<f64>>,
    dim: usize,
}

impl NearestNeighbors {
    pub fn from_artifact(artifact: NeighborsArtifact) -> AuthResult<Self> {
        let NeighborsArtifact { n_neighbors, points } = artifact;
        if n_neighbors == 0 {
            return Err(AuthError::InvalidModel("n_neighbors must be at least 1".into()));
        }
        if points.len() < n_neighbors {
            return Err(AuthError::InvalidModel(format!(
                "{} enrolled points cannot serve {} neighbors",
                points.len(),
                n_neighbors
            )));
        }
        let dim = points[0].len();
        if let Some(p) = points.iter().find(|p| p.len() != dim) {
            return Err(AuthError::dimension("neighbor point", dim, p.len()));
        }
        Ok(Self {
            n_neighbors,
            points,
            dim,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Distances to the `n_neighbors` closest points, ascending.
    pub fn kneighbors(&self, x: &[f64]) -> AuthResult<Vec<f64>> {
        if x.len() != self.dim {
            return Err(AuthError::dimension("neighbor query", self.dim, x.len()));
        }
        let mut distances: Vec<f64> = self.points.iter().map(|p| euclidean(p, x)).collect();
        distances.sort_by(|a, b| a.total_cmp(b));
        distances.truncate(self.n_neighbors);
        Ok(distances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(k: usize) -> NearestNeighbors {
        NearestNeighbors::from_artifact(NeighborsArtifact {
            n_neighbors: k,
            points: vec![vec![0.0, 0.0], vec![0.0, 3.0], vec![4.0, 0.0], vec![10.0, 10.0]],
        })
        .unwrap()
    }

    #[test]
    fn returns_k_closest_sorted() {
        assert_eq!(index(3).kneighbors(&[0.0, 0.0]).unwrap(), vec![0.0, 3.0, 4.0]);
        assert_eq!(index(1).kneighbors(&[4.0, 3.0]).unwrap(), vec![3.0]);
    }

    #[test]
    fn too_few_points_rejected() {
        let err = NearestNeighbors::from_artifact(NeighborsArtifact {
            n_neighbors: 3,
            points: vec![vec![0.0]],
        });
        assert!(matches!(err, Err(AuthError::InvalidModel(_))));
    }

    #[test]
    fn query_dimension_checked() {
        assert!(index(2).kneighbors(&[1.0]).is_err());
    }
}
