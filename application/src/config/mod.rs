//! Admission parameters - group matching control.
//!
//! [`AdmissionParams`] groups the static parameters that control group
//! matching in [`AdmitPatientUseCase`](crate::use_cases::admit_patient::AdmitPatientUseCase).
//! These are application-layer concerns, not domain policy. The defaults
//! mirror the production deployment; all of them are overridable per
//! deployment through the configuration file.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Group admission control parameters.
///
/// Controls the admission window, group scheduling offset, default group
/// capacity, insert retry bound, and the per-call persistence deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionParams {
    /// How far ahead of `now` an open group may be scheduled and still
    /// admit this patient (closed interval, inclusive of both ends).
    pub admission_window: Duration,
    /// Offset from `now` at which a newly created group is scheduled.
    pub schedule_offset: Duration,
    /// Member capacity for newly created groups.
    pub default_capacity: u32,
    /// Maximum conditional-insert attempts against candidate groups before
    /// falling through to group creation.
    pub max_insert_attempts: usize,
    /// Deadline applied to each persistence call; `None` disables it.
    pub store_timeout: Option<Duration>,
}

impl Default for AdmissionParams {
    fn default() -> Self {
        Self {
            admission_window: Duration::from_secs(120),
            schedule_offset: Duration::from_secs(60),
            default_capacity: 8,
            max_insert_attempts: 3,
            store_timeout: Some(Duration::from_secs(5)),
        }
    }
}

impl AdmissionParams {
    // ==================== Builder Methods ====================

    pub fn with_admission_window(mut self, window: Duration) -> Self {
        self.admission_window = window;
        self
    }

    pub fn with_schedule_offset(mut self, offset: Duration) -> Self {
        self.schedule_offset = offset;
        self
    }

    pub fn with_default_capacity(mut self, capacity: u32) -> Self {
        self.default_capacity = capacity;
        self
    }

    pub fn with_max_insert_attempts(mut self, attempts: usize) -> Self {
        self.max_insert_attempts = attempts;
        self
    }

    pub fn with_store_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.store_timeout = timeout;
        self
    }
}
