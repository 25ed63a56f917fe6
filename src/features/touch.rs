use super::{FeatureSchema, FeatureVector};
use crate::math::{mean, std_dev};
use crate::payload::TouchEvent;

pub const MIN_PRESSES: usize = 2;

/// Inter-press interval mean and std plus press count. A press without a
/// timestamp makes the whole window unusable.
pub fn extract(events: &[TouchEvent]) -> Option<FeatureVector> {
    let presses: Vec<f64> = events
        .iter()
        .filter(|e| e.is_press())
        .map(|e| e.timestamp)
        .collect::<Option<_>>()?;
    if presses.len() < MIN_PRESSES {
        return None;
    }

    let intervals: Vec<f64> = presses.windows(2).map(|w| w[1] - w[0]).collect();
    Some(FeatureVector::from_schema(
        FeatureSchema::Touch,
        vec![mean(&intervals), std_dev(&intervals), presses.len() as f64],
    ))
}
