use crate::error::AuthResult;
use crate::features::FeatureVector;
use crate::math::squash;
use crate::model::BoundaryBundle;

/// Optional standardization, then the squashed boundary decision value.
pub fn score(bundle: &BoundaryBundle, features: &FeatureVector) -> AuthResult<f64> {
    let decision = match &bundle.scaler {
        Some(scaler) => bundle.boundary.decision_function(&scaler.transform(features.as_slice())?),
        None => bundle.boundary.decision_function(features.as_slice()),
    };
    Ok(squash(decision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureSchema;
    use crate::model::{BoundaryClassifier, StandardScaler};

    /// Decision value = first input component.
    struct FirstComponent;

    impl BoundaryClassifier for FirstComponent {
        fn decision_function(&self, x: &[f64]) -> f64 {
            x[0]
        }
    }

    #[test]
    fn scaler_applied_before_decision() {
        let scaler = StandardScaler::new(vec![110.0, 0.0], vec![10.0, 1.0]).unwrap();
        let bundle = BoundaryBundle::new(Box::new(FirstComponent), Some(scaler));
        let fv = FeatureVector::new(FeatureSchema::Tap, vec![110.0, 5.5]).unwrap();
        assert_eq!(score(&bundle, &fv).unwrap(), 0.5);
    }

    #[test]
    fn unscaled_bundle_uses_raw_features() {
        let bundle = BoundaryBundle::new(Box::new(FirstComponent), None);
        let fv = FeatureVector::new(FeatureSchema::Tap, vec![0.0, 99.0]).unwrap();
        assert_eq!(score(&bundle, &fv).unwrap(), 0.5);
        let fv = FeatureVector::new(FeatureSchema::Tap, vec![4.0, 99.0]).unwrap();
        assert!(score(&bundle, &fv).unwrap() > 0.9);
    }

    #[test]
    fn repeated_scoring_is_identical() {
        let bundle = BoundaryBundle::new(Box::new(FirstComponent), None);
        let fv = FeatureVector::new(FeatureSchema::Swipe, vec![0.3, 1.0, 2.0]).unwrap();
        assert_eq!(score(&bundle, &fv).unwrap(), score(&bundle, &fv).unwrap());
    }
}
