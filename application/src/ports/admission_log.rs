//! Port for structured admission logging.
//!
//! Defines the [`AdmissionLogger`] trait for recording admission decisions
//! (group joined, group created, races lost, integrity warnings) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures the
//! admission audit trail in a machine-readable format (JSONL).

use serde_json::Value;

/// A structured admission event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields.
pub struct AdmissionEvent {
    /// Event type identifier (e.g., "admission", "capacity_race_lost").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AdmissionEvent {
    /// Create a new admission event.
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging admission events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL
/// line). The `log` method is intentionally synchronous and non-fallible to
/// avoid disrupting the admission flow - logging failures are silently
/// ignored.
pub trait AdmissionLogger: Send + Sync {
    /// Record an admission event.
    fn log(&self, event: AdmissionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoAdmissionLog;

impl AdmissionLogger for NoAdmissionLog {
    fn log(&self, _event: AdmissionEvent) {}
}
