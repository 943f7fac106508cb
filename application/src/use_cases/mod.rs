//! Use cases - the operations this subsystem exposes to callers

pub mod admit_patient;
pub mod clinician_schedule;
pub mod shared;
pub mod summarize_group;
