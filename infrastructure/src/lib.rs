//! Infrastructure layer for cohort
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, FileAdmissionConfig, FileClinician, FileConfig, FileLogConfig,
    FileRosterConfig,
};
pub use logging::JsonlAdmissionLogger;
pub use store::InMemoryGroupStore;
