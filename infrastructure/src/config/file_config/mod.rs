//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain/application
//! types on demand.

mod admission;
mod log;
mod roster;

pub use admission::FileAdmissionConfig;
pub use log::FileLogConfig;
pub use roster::{ConfigError, FileClinician, FileRosterConfig};

use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Group admission settings
    pub admission: FileAdmissionConfig,
    /// Clinician roster reference data
    pub roster: FileRosterConfig,
    /// Structured log settings
    pub log: FileLogConfig,
}
