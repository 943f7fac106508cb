//! Admission configuration from TOML (`[admission]` section)

use cohort_application::AdmissionParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw admission configuration from TOML.
///
/// Defaults mirror the original deployment constants: a two-minute
/// admission window, groups scheduled one minute out, capacity eight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAdmissionConfig {
    /// Admission window length in seconds.
    pub window_secs: u64,
    /// Offset, in seconds, at which new groups are scheduled.
    pub schedule_offset_secs: u64,
    /// Member capacity for newly created groups.
    pub default_capacity: u32,
    /// Conditional-insert attempts before falling through to creation.
    pub max_insert_attempts: usize,
    /// Per-call persistence deadline in milliseconds; absent disables it.
    pub store_timeout_ms: Option<u64>,
}

impl Default for FileAdmissionConfig {
    fn default() -> Self {
        Self {
            window_secs: 120,
            schedule_offset_secs: 60,
            default_capacity: 8,
            max_insert_attempts: 3,
            store_timeout_ms: Some(5000),
        }
    }
}

impl FileAdmissionConfig {
    /// Convert into application-layer admission parameters.
    pub fn to_params(&self) -> AdmissionParams {
        AdmissionParams::default()
            .with_admission_window(Duration::from_secs(self.window_secs))
            .with_schedule_offset(Duration::from_secs(self.schedule_offset_secs))
            .with_default_capacity(self.default_capacity)
            .with_max_insert_attempts(self.max_insert_attempts)
            .with_store_timeout(self.store_timeout_ms.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_deployment_constants() {
        let params = FileAdmissionConfig::default().to_params();
        assert_eq!(params.admission_window, Duration::from_secs(120));
        assert_eq!(params.schedule_offset, Duration::from_secs(60));
        assert_eq!(params.default_capacity, 8);
        assert_eq!(params.store_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_overrides_flow_through() {
        let config: FileAdmissionConfig = toml::from_str(
            r#"
            window_secs = 300
            default_capacity = 4
            "#,
        )
        .unwrap();

        let params = config.to_params();
        assert_eq!(params.admission_window, Duration::from_secs(300));
        assert_eq!(params.default_capacity, 4);
        // Unspecified fields keep their defaults
        assert_eq!(params.max_insert_attempts, 3);
    }
}
