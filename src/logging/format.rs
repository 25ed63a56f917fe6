//! JSON log lines: one JSON object per line (ndjson) for ingestion and audit.

use serde::Serialize;
use std::io::{self, Write};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Audit record for one authentication decision.
#[derive(Serialize)]
pub struct AuditEvent<'a> {
    pub ts: String,
    pub request_id: &'a str,
    pub mode: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<&'a str>,
    pub authenticated: bool,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

/// Tracing setup and audit line output.
pub struct StructuredLogger;

impl StructuredLogger {
    /// Install the global subscriber writing to `writer`; level from RUST_LOG,
    /// else `default_level`. The binary passes stderr since stdout carries verdicts.
    pub fn init<W>(json: bool, default_level: &str, writer: W) -> Result<(), TryInitError>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let registry = tracing_subscriber::registry().with(filter);
        if json {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(FmtSpan::NONE)
                        .with_writer(writer),
                )
                .try_init()
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(writer))
                .try_init()
        }
    }

    /// Write `event` as one ndjson line, outside of tracing.
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer(&mut *w, event)?;
        writeln!(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn audit_line_is_single_json_object() {
        let event = AuditEvent {
            ts: "2026-01-01T00:00:00Z".into(),
            request_id: "r1",
            mode: "one_shot",
            user_id: None,
            authenticated: false,
            confidence: 0.0,
            anomaly: None,
            reason: Some("No usable behavioral data"),
        };
        let mut buf = Vec::new();
        StructuredLogger::emit_json(&event, &mut buf).unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.ends_with('\n'));
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["mode"], "one_shot");
        assert!(parsed.get("user_id").is_none());
        assert!(parsed.get("anomaly").is_none());
    }

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn json_subscriber_writes_to_given_writer() {
        let sink = Shared::default();
        let make = {
            let sink = sink.clone();
            move || sink.clone()
        };
        StructuredLogger::init(true, "info", make).unwrap();
        tracing::warn!(modality = "tap", "json sink check");

        let out = String::from_utf8(sink.0.lock().unwrap().clone()).unwrap();
        let line = out
            .lines()
            .find(|l| l.contains("json sink check"))
            .expect("event written to sink");
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["fields"]["modality"], "tap");

        // a second global subscriber is refused, not a panic
        assert!(StructuredLogger::init(false, "info", io::sink).is_err());
    }
}
