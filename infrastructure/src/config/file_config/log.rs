//! Log configuration from TOML (`[log]` section)

use serde::{Deserialize, Serialize};

/// Raw log configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Path to the JSONL admission audit log; absent disables it.
    pub admission_log: Option<String>,
}
