use super::{FeatureSchema, FeatureVector};
use crate::math::mean;
use crate::payload::TapData;

pub const MIN_TAPS: usize = 3;

/// Mean reaction time and mean travel distance.
pub fn extract(data: &TapData) -> Option<FeatureVector> {
    if data.taps.len() < MIN_TAPS {
        return None;
    }
    let reaction: Vec<f64> = data.taps.iter().map(|t| t.reaction_time).collect();
    let distance: Vec<f64> = data.taps.iter().map(|t| t.distance).collect();
    Some(FeatureVector::from_schema(
        FeatureSchema::Tap,
        vec![mean(&reaction), mean(&distance)],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::TapEvent;

    fn taps(pairs: &[(f64, f64)]) -> TapData {
        TapData {
            taps: pairs
                .iter()
                .map(|&(reaction_time, distance)| TapEvent {
                    reaction_time,
                    distance,
                })
                .collect(),
        }
    }

    #[test]
    fn means_of_three_taps() {
        let fv = extract(&taps(&[(100.0, 5.0), (120.0, 6.0), (110.0, 5.5)])).unwrap();
        assert_eq!(fv.as_slice(), &[110.0, 5.5]);
    }

    #[test]
    fn two_taps_is_insufficient() {
        assert!(extract(&taps(&[(100.0, 5.0), (120.0, 6.0)])).is_none());
    }
}
