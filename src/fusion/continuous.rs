//! Continuous session verification: per-modality same-user votes, fail-open
//! when nothing could vote.

use super::verdict::{accepts, ContinuousVerdict};
use crate::config::ContinuousConfig;
use crate::features::{self, FeatureVector, Modality};
use crate::model::{ContinuousModels, IdentityClassifier};
use crate::payload::{BehavioralPayload, SubPayload, TouchEvent};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalityVote {
    pub modality: Modality,
    pub same_user: bool,
}

pub struct ContinuousFusionEngine {
    models: Arc<ContinuousModels>,
    config: ContinuousConfig,
}

impl ContinuousFusionEngine {
    pub fn new(models: Arc<ContinuousModels>, config: ContinuousConfig) -> Self {
        Self { models, config }
    }

    pub fn enabled(&self, modality: Modality) -> bool {
        self.models.enabled(modality)
    }

    pub fn authenticate(&self, payload: &BehavioralPayload) -> ContinuousVerdict {
        let claimed = payload.user_id.as_deref();
        let mut votes = Vec::new();

        if let Some(model) = self.models.motion.as_deref() {
            let extracted = Self::extract(
                Modality::Motion,
                payload.continuous_motion(),
                features::motion::extract_continuous,
            );
            votes.extend(extracted.map(|f| Self::vote(Modality::Motion, model, &f, claimed)));
        }
        if let Some(model) = self.models.touch.as_deref() {
            let extracted = Self::extract(Modality::Touch, payload.touch(), |events: &Vec<TouchEvent>| {
                features::touch::extract(events)
            });
            votes.extend(extracted.map(|f| Self::vote(Modality::Touch, model, &f, claimed)));
        }

        if votes.is_empty() {
            info!(user_id = ?claimed, "no continuous votes; session kept");
            return ContinuousVerdict::insufficient_data();
        }

        let same = votes.iter().filter(|v| v.same_user).count();
        let confidence = same as f64 / votes.len() as f64;
        let authenticated = accepts(confidence, self.config.acceptance_threshold);
        let dissenting: Vec<&str> = votes
            .iter()
            .filter(|v| !v.same_user)
            .map(|v| v.modality.as_str())
            .collect();
        info!(
            user_id = ?claimed,
            authenticated,
            confidence,
            votes = votes.len(),
            dissenting = ?dissenting,
            "continuous verdict"
        );
        ContinuousVerdict {
            authenticated,
            anomaly: !authenticated,
            confidence,
            votes: Some(votes.into_iter().map(|v| v.same_user).collect()),
            reason: None,
        }
    }

    fn extract<T>(
        modality: Modality,
        sub: SubPayload<T>,
        extract: impl FnOnce(&T) -> Option<FeatureVector>,
    ) -> Option<FeatureVector> {
        let extracted = match sub {
            SubPayload::Absent => return None,
            SubPayload::Malformed(reason) => {
                debug!(%modality, %reason, "malformed sub-payload");
                None
            }
            SubPayload::Parsed(data) => extract(&data).filter(FeatureVector::is_finite),
        };
        if extracted.is_none() {
            debug!(%modality, "insufficient data; no vote");
        }
        extracted
    }

    fn vote(
        modality: Modality,
        model: &dyn IdentityClassifier,
        features: &FeatureVector,
        claimed: Option<&str>,
    ) -> ModalityVote {
        let predicted = model.predict(features.as_slice());
        let same_user = claimed == Some(predicted);
        debug!(%modality, predicted, same_user, "continuous vote");
        ModalityVote { modality, same_user }
    }
}
