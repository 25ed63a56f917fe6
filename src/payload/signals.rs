//! Typed shapes of the per-modality sub-payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    /// How long the key was held down (ms)
    pub hold_time: f64,
    /// Gap since the previous key (ms)
    pub inter_key_delay: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeystrokeData {
    #[serde(default)]
    pub attempts: Vec<Vec<KeyEvent>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TapEvent {
    pub reaction_time: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TapData {
    #[serde(default)]
    pub taps: Vec<TapEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeEvent {
    pub duration: f64,
    pub speed: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwipeData {
    #[serde(default)]
    pub swipes: Vec<SwipeEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorData {
    #[serde(default)]
    pub accelerometer: Vec<AxisSample>,
    #[serde(default)]
    pub gyroscope: Vec<AxisSample>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionData {
    #[serde(default)]
    pub sensor_data: SensorData,
}

/// Axis sample whose missing components read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LenientAxisSample {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuousMotionData {
    #[serde(default)]
    pub accelerometer: Vec<LenientAxisSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// `press`, `release`, `swipe` or `tap`
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: Option<f64>,
}

impl TouchEvent {
    pub fn is_press(&self) -> bool {
        self.kind == "press"
    }
}
