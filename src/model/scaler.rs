use crate::error::{AuthError, AuthResult};
use serde::{Deserialize, Serialize};

/// Per-feature standardization: `(x - mean) / scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> AuthResult<Self> {
        let s = Self { mean, scale };
        s.validate()?;
        Ok(s)
    }

    /// Scaler that leaves inputs unchanged.
    pub fn identity(dim: usize) -> Self {
        Self {
            mean: vec![0.0; dim],
            scale: vec![1.0; dim],
        }
    }

    pub fn validate(&self) -> AuthResult<()> {
        if self.mean.len() != self.scale.len() {
            return Err(AuthError::dimension("scaler scale", self.mean.len(), self.scale.len()));
        }
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.mean.len()
    }

    pub fn transform(&self, x: &[f64]) -> AuthResult<Vec<f64>> {
        if x.len() != self.dim() {
            return Err(AuthError::dimension("scaler input", self.dim(), x.len()));
        }
        Ok(x.iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| {
                // zero-variance features were fitted with unit scale
                let s = if *s == 0.0 { 1.0 } else { *s };
                (v - m) / s
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardizes_each_feature() {
        let s = StandardScaler::new(vec![1.0, 10.0, 5.0], vec![2.0, 5.0, 0.0]).unwrap();
        assert_eq!(s.transform(&[3.0, 0.0, 7.0]).unwrap(), vec![1.0, -2.0, 2.0]);
    }

    #[test]
    fn wrong_input_length_is_an_error() {
        let s = StandardScaler::identity(2);
        assert!(matches!(
            s.transform(&[1.0]),
            Err(AuthError::DimensionMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn mismatched_parameters_rejected() {
        assert!(StandardScaler::new(vec![0.0], vec![1.0, 1.0]).is_err());
    }
}
