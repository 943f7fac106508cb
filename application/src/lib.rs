//! Application layer for cohort
//!
//! This crate contains use cases, port definitions, and application
//! configuration for the admission engine. It depends only on the domain
//! layer; concrete stores and loggers plug in from the infrastructure layer
//! through the ports.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::AdmissionParams;
pub use ports::{
    admission_log::{AdmissionEvent, AdmissionLogger, NoAdmissionLog},
    group_store::{GroupStore, InsertOutcome, OpenGroupQuery, StoreError},
};
pub use use_cases::admit_patient::{Admission, AdmitPatientError, AdmitPatientUseCase};
pub use use_cases::clinician_schedule::{ClinicianScheduleUseCase, ScheduledGroup};
pub use use_cases::summarize_group::{GroupReport, SummarizeGroupError, SummarizeGroupUseCase};
