//! One-shot decision fusion: average whatever modality scores the request supports.

use super::verdict::{accepts, AuthVerdict};
use crate::config::{FusionConfig, InsufficientDataPolicy};
use crate::features::{self, FeatureVector, Modality};
use crate::model::ModelBundles;
use crate::payload::{BehavioralPayload, SubPayload};
use crate::scoring;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One modality's contribution to a request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModalityScore {
    pub modality: Modality,
    pub score: f64,
}

/// Scores collected for one request, in modality priority order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSet {
    entries: Vec<ModalityScore>,
}

impl ScoreSet {
    pub fn push(&mut self, modality: Modality, score: f64) {
        self.entries.push(ModalityScore { modality, score });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ModalityScore] {
        &self.entries
    }

    pub fn mean(&self) -> f64 {
        let scores: Vec<f64> = self.entries.iter().map(|e| e.score).collect();
        crate::math::mean(&scores)
    }

    /// Reduce to a verdict; an empty set fails closed.
    pub fn into_verdict(self, threshold: f64) -> AuthVerdict {
        if self.is_empty() {
            return AuthVerdict::no_usable_data();
        }
        let confidence = self.mean();
        AuthVerdict {
            authenticated: accepts(confidence, threshold),
            confidence,
            scores: Some(self.entries.into_iter().map(|e| e.score).collect()),
            reason: None,
        }
    }
}

pub struct DecisionFusionEngine {
    bundles: Arc<ModelBundles>,
    config: FusionConfig,
}

impl DecisionFusionEngine {
    pub fn new(bundles: Arc<ModelBundles>, config: FusionConfig) -> Self {
        Self { bundles, config }
    }

    /// Never fails: unusable modalities are dropped and a request with no
    /// usable modality gets the "no usable data" verdict.
    pub fn authenticate(&self, payload: &BehavioralPayload) -> AuthVerdict {
        let mut scores = ScoreSet::default();

        self.collect(Modality::Keystroke, payload.keystroke(), features::keystroke::extract, &mut scores);
        self.collect(Modality::Tap, payload.tap(), features::tap::extract, &mut scores);
        self.collect(Modality::Swipe, payload.swipe(), features::swipe::extract, &mut scores);
        self.collect(Modality::Motion, payload.motion(), features::motion::extract, &mut scores);

        let modalities: Vec<&str> = scores.entries().iter().map(|e| e.modality.as_str()).collect();
        let verdict = scores.into_verdict(self.config.acceptance_threshold);
        info!(
            authenticated = verdict.authenticated,
            confidence = verdict.confidence,
            modalities = ?modalities,
            "one-shot verdict"
        );
        verdict
    }

    fn collect<T>(
        &self,
        modality: Modality,
        sub: SubPayload<T>,
        extract: impl FnOnce(&T) -> Option<FeatureVector>,
        scores: &mut ScoreSet,
    ) {
        let features = match sub {
            SubPayload::Absent => return,
            SubPayload::Malformed(reason) => {
                debug!(%modality, %reason, "malformed sub-payload");
                None
            }
            SubPayload::Parsed(data) => extract(&data).filter(|f| {
                if !f.is_finite() {
                    debug!(%modality, "non-finite features");
                }
                f.is_finite()
            }),
        };

        let Some(features) = features else {
            match self.config.insufficient_data {
                InsufficientDataPolicy::Exclude => {
                    debug!(%modality, "insufficient data; modality excluded");
                }
                InsufficientDataPolicy::ZeroScore => {
                    debug!(%modality, "insufficient data; counted as 0.0");
                    scores.push(modality, 0.0);
                }
            }
            return;
        };

        match scoring::score(&self.bundles, &features) {
            Ok(score) if score.is_finite() => {
                debug!(%modality, score, "modality scored");
                scores.push(modality, score);
            }
            Ok(score) => warn!(%modality, score, "non-finite score; modality excluded"),
            Err(e) => warn!(%modality, error = %e, "scoring failed; modality excluded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_score_set_fails_closed() {
        let v = ScoreSet::default().into_verdict(0.6);
        assert_eq!(v, AuthVerdict::no_usable_data());
    }

    #[test]
    fn mean_of_scores_in_order() {
        let mut s = ScoreSet::default();
        s.push(Modality::Keystroke, 1.0);
        s.push(Modality::Tap, 0.5);
        let v = s.into_verdict(0.6);
        assert!(v.authenticated);
        assert_eq!(v.confidence, 0.75);
        assert_eq!(v.scores, Some(vec![1.0, 0.5]));
        assert!(v.reason.is_none());
    }
}
