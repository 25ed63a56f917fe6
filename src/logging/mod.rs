//! Structured logging setup and audit lines.

mod format;

pub use format::{AuditEvent, StructuredLogger};
