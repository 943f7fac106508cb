//! Clinician entities
//!
//! Clinicians are static reference data, injected by the caller (typically
//! from configuration) and read-only to the admission engine.

use crate::triage::Category;
use serde::{Deserialize, Serialize};

/// Department identifier used as the selector's safety net: when no
/// specialist covers a category, any clinician from this department is an
/// acceptable fallback.
pub const INTERNAL_MEDICINE: &str = "internal-medicine";

/// Unique identifier for a clinician.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClinicianId(String);

impl ClinicianId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for ClinicianId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for ClinicianId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A clinician on the roster (reference data, read-only here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clinician {
    pub id: ClinicianId,
    pub name: String,
    pub department: String,
    pub specialties: Vec<Category>,
    pub experience_years: u32,
    /// Quality rating on a 0-5 scale.
    pub rating: f32,
}

impl Clinician {
    pub fn new(
        id: impl Into<ClinicianId>,
        name: impl Into<String>,
        department: impl Into<String>,
        specialties: Vec<Category>,
        experience_years: u32,
        rating: f32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: department.into(),
            specialties,
            experience_years,
            rating,
        }
    }

    /// Whether this clinician's specialties cover the category.
    pub fn covers(&self, category: Category) -> bool {
        self.specialties.contains(&category)
    }

    /// Weighted quality score used for ranking: rating dominates, tempered
    /// by experience normalized against a 30-year career.
    pub fn quality_score(&self) -> f64 {
        f64::from(self.rating) * 0.6 + (f64::from(self.experience_years) / 30.0) * 0.4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covers_checks_specialty_set() {
        let clinician = Clinician::new(
            "dr-1",
            "Tanaka",
            INTERNAL_MEDICINE,
            vec![Category::RespiratoryInfectious, Category::GeneralInternal],
            15,
            4.8,
        );

        assert!(clinician.covers(Category::RespiratoryInfectious));
        assert!(!clinician.covers(Category::Dermatologic));
    }

    #[test]
    fn test_quality_score_weights() {
        let clinician = Clinician::new("dr-1", "Tanaka", INTERNAL_MEDICINE, vec![], 15, 4.8);
        let expected = 4.8 * 0.6 + (15.0 / 30.0) * 0.4;
        assert!((clinician.quality_score() - expected).abs() < 1e-6);
    }
}
