//! Configuration loading for the admission engine

mod file_config;
mod loader;

pub use file_config::{
    ConfigError, FileAdmissionConfig, FileClinician, FileConfig, FileLogConfig, FileRosterConfig,
};
pub use loader::ConfigLoader;
