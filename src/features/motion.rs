//! Device motion statistics (accelerometer and gyroscope).

use super::{FeatureSchema, FeatureVector};
use crate::math::{mean, std_dev};
use crate::payload::{AxisSample, ContinuousMotionData, MotionData};

/// Minimum samples per sensor for one-shot authentication.
pub const MIN_SAMPLES: usize = 10;

fn axes(samples: impl Iterator<Item = (f64, f64, f64)>) -> [Vec<f64>; 3] {
    let mut out: [Vec<f64>; 3] = Default::default();
    for (x, y, z) in samples {
        out[0].push(x);
        out[1].push(y);
        out[2].push(z);
    }
    out
}

fn xyz(s: &AxisSample) -> (f64, f64, f64) {
    (s.x, s.y, s.z)
}

/// (mean, std) pairs for accelerometer x/y/z then gyroscope x/y/z.
pub fn extract(data: &MotionData) -> Option<FeatureVector> {
    let sensor = &data.sensor_data;
    if sensor.accelerometer.len() < MIN_SAMPLES || sensor.gyroscope.len() < MIN_SAMPLES {
        return None;
    }

    let mut values = Vec::with_capacity(FeatureSchema::Motion.len());
    for series in [&sensor.accelerometer, &sensor.gyroscope] {
        for axis in axes(series.iter().map(xyz)) {
            values.push(mean(&axis));
            values.push(std_dev(&axis));
        }
    }
    Some(FeatureVector::from_schema(FeatureSchema::Motion, values))
}

/// Accelerometer means, stds and signal magnitude area for session monitoring.
pub fn extract_continuous(data: &ContinuousMotionData) -> Option<FeatureVector> {
    if data.accelerometer.is_empty() {
        return None;
    }
    let [x, y, z] = axes(data.accelerometer.iter().map(|s| (s.x, s.y, s.z)));
    let sma: Vec<f64> = data
        .accelerometer
        .iter()
        .map(|s| s.x.abs() + s.y.abs() + s.z.abs())
        .collect();

    let values = vec![
        mean(&x),
        mean(&y),
        mean(&z),
        std_dev(&x),
        std_dev(&y),
        std_dev(&z),
        mean(&sma),
    ];
    Some(FeatureVector::from_schema(FeatureSchema::ContinuousMotion, values))
}
