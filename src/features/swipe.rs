use super::{FeatureSchema, FeatureVector};
use crate::math::mean;
use crate::payload::SwipeData;

pub const MIN_SWIPES: usize = 3;

/// Mean duration, mean speed, mean distance.
pub fn extract(data: &SwipeData) -> Option<FeatureVector> {
    if data.swipes.len() < MIN_SWIPES {
        return None;
    }
    let duration: Vec<f64> = data.swipes.iter().map(|s| s.duration).collect();
    let speed: Vec<f64> = data.swipes.iter().map(|s| s.speed).collect();
    let distance: Vec<f64> = data.swipes.iter().map(|s| s.distance).collect();
    Some(FeatureVector::from_schema(
        FeatureSchema::Swipe,
        vec![mean(&duration), mean(&speed), mean(&distance)],
    ))
}
