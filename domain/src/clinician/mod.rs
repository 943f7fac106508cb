//! Clinician domain - roster reference data and best-fit selection

pub mod entities;
pub mod selector;

pub use entities::{Clinician, ClinicianId, INTERNAL_MEDICINE};
pub use selector::select_best;
