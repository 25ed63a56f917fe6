//! Request payloads: the raw per-modality signals the client app captured.
//!
//! Sub-payloads are kept as raw JSON until an extractor asks for them, so a
//! malformed modality only costs that modality and never the whole request.

mod signals;

pub use signals::{
    AxisSample, ContinuousMotionData, KeyEvent, KeystrokeData, LenientAxisSample, MotionData,
    SensorData, SwipeData, SwipeEvent, TapData, TapEvent, TouchEvent,
};

use crate::error::AuthResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

/// One authentication request. One-shot requests carry keystroke, tap, swipe
/// and motion data; continuous requests carry motion data, touch events and
/// the claimed `userId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehavioralPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystroke_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_events: Option<Value>,
}

/// Outcome of reading one sub-payload.
#[derive(Debug, Clone, PartialEq)]
pub enum SubPayload<T> {
    /// Key missing, null, or empty.
    Absent,
    /// Present but does not match the expected shape.
    Malformed(String),
    Parsed(T),
}

impl<T> SubPayload<T> {
    pub fn is_present(&self) -> bool {
        !matches!(self, SubPayload::Absent)
    }

    pub fn parsed(self) -> Option<T> {
        match self {
            SubPayload::Parsed(v) => Some(v),
            _ => None,
        }
    }
}

/// JSON truthiness: null, false, 0, "", [] and {} are all "no data".
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn read<T: DeserializeOwned>(raw: Option<&Value>) -> SubPayload<T> {
    match raw {
        Some(v) if is_truthy(v) => match T::deserialize(v) {
            Ok(parsed) => SubPayload::Parsed(parsed),
            Err(e) => SubPayload::Malformed(e.to_string()),
        },
        _ => SubPayload::Absent,
    }
}

impl BehavioralPayload {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Read a whole request body, e.g. stdin.
    pub fn from_reader(mut reader: impl Read) -> AuthResult<Self> {
        let mut raw = String::new();
        reader.read_to_string(&mut raw)?;
        Ok(Self::from_json(&raw)?)
    }

    pub fn from_path(path: &Path) -> AuthResult<Self> {
        Self::from_reader(std::fs::File::open(path)?)
    }

    pub fn keystroke(&self) -> SubPayload<KeystrokeData> {
        read(self.keystroke_data.as_ref())
    }

    pub fn tap(&self) -> SubPayload<TapData> {
        read(self.tap_data.as_ref())
    }

    pub fn swipe(&self) -> SubPayload<SwipeData> {
        read(self.swipe_data.as_ref())
    }

    pub fn motion(&self) -> SubPayload<MotionData> {
        read(self.motion_data.as_ref())
    }

    /// Continuous sessions send the sensor buffer directly (no `sensorData` wrapper).
    pub fn continuous_motion(&self) -> SubPayload<ContinuousMotionData> {
        read(self.motion_data.as_ref())
    }

    pub fn touch(&self) -> SubPayload<Vec<TouchEvent>> {
        read(self.touch_events.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_matches_empty_values() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!({})));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!({"taps": []})));
        assert!(is_truthy(&json!([1])));
    }

    #[test]
    fn empty_object_sub_payload_is_absent() {
        let p = BehavioralPayload::from_json(r#"{"tapData": {}}"#).unwrap();
        assert_eq!(p.tap(), SubPayload::Absent);
        assert!(!p.tap().is_present());
    }

    #[test]
    fn missing_field_is_malformed_not_fatal() {
        let p = BehavioralPayload::from_json(
            r#"{"tapData": {"taps": [{"reactionTime": 100}]}, "swipeData": {"swipes": []}}"#,
        )
        .unwrap();
        assert!(matches!(p.tap(), SubPayload::Malformed(_)));
        match p.swipe() {
            SubPayload::Parsed(s) => assert!(s.swipes.is_empty()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn camel_case_keys() {
        let p = BehavioralPayload::from_json(
            r#"{"userId": "alice", "touchEvents": [{"type": "press", "timestamp": 10}]}"#,
        )
        .unwrap();
        assert_eq!(p.user_id.as_deref(), Some("alice"));
        let touches = p.touch().parsed().unwrap();
        assert_eq!(touches[0].kind, "press");
        assert_eq!(touches[0].timestamp, Some(10.0));
    }

    #[test]
    fn unreadable_or_invalid_body_is_typed() {
        use crate::error::AuthError;

        let err = BehavioralPayload::from_path(Path::new("no/such/payload.json")).unwrap_err();
        assert!(matches!(err, AuthError::Io(_)), "{err}");

        let err = BehavioralPayload::from_reader(&b"{\"tapData\": "[..]).unwrap_err();
        assert!(matches!(err, AuthError::Json(_)), "{err}");

        let p = BehavioralPayload::from_reader(&br#"{"userId": "bob"}"#[..]).unwrap();
        assert_eq!(p.user_id.as_deref(), Some("bob"));
    }
}
