//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No clinicians available")]
    NoCliniciansAvailable,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}
