//! Keystroke rhythm features from the first typing attempt.

use super::{FeatureSchema, FeatureVector};
use crate::math::pad_sequence;
use crate::payload::{KeyEvent, KeystrokeData};

/// Number of key events kept per sequence (padded or truncated).
pub const WINDOW: usize = 30;

/// Attempts shorter than this carry too little rhythm to score.
pub const MIN_EVENTS: usize = 5;

/// Extract the 60-value keystroke vector, or `None` for insufficient data.
pub fn extract(data: &KeystrokeData) -> Option<FeatureVector> {
    let attempt = data.attempts.first()?;
    if attempt.len() < MIN_EVENTS {
        return None;
    }
    Some(attempt_vector(attempt))
}

/// Padded hold times followed by padded inter-key delays. No minimum applied.
pub fn attempt_vector(attempt: &[KeyEvent]) -> FeatureVector {
    let hold: Vec<f64> = attempt.iter().map(|e| e.hold_time).collect();
    let delay: Vec<f64> = attempt.iter().map(|e| e.inter_key_delay).collect();

    let mut values = pad_sequence(&hold, WINDOW);
    values.extend(pad_sequence(&delay, WINDOW));
    FeatureVector::from_schema(FeatureSchema::Keystroke, values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(n: usize) -> Vec<KeyEvent> {
        (0..n)
            .map(|i| KeyEvent {
                hold_time: 100.0 + i as f64,
                inter_key_delay: 200.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn short_attempt_pads_with_zeros() {
        let fv = attempt_vector(&attempt(3));
        let v = fv.as_slice();
        assert_eq!(v.len(), 60);
        assert_eq!(&v[..3], &[100.0, 101.0, 102.0]);
        assert!(v[3..30].iter().all(|x| *x == 0.0));
        assert_eq!(&v[30..33], &[200.0, 201.0, 202.0]);
        assert!(v[33..60].iter().all(|x| *x == 0.0));
    }

    #[test]
    fn long_attempt_truncates_right() {
        let fv = attempt_vector(&attempt(45));
        let v = fv.as_slice();
        assert_eq!(v.len(), 60);
        assert_eq!(v[29], 129.0);
        assert_eq!(v[30], 200.0);
        assert_eq!(v[59], 229.0);
    }

    #[test]
    fn requires_five_events_in_first_attempt() {
        let data = KeystrokeData {
            attempts: vec![attempt(4), attempt(10)],
        };
        assert!(extract(&data).is_none());

        let data = KeystrokeData {
            attempts: vec![attempt(5), attempt(1)],
        };
        assert_eq!(extract(&data).unwrap().len(), 60);

        assert!(extract(&KeystrokeData::default()).is_none());
    }
}
