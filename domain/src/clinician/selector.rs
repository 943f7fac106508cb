//! Best-fit clinician selection
//!
//! Picks the highest-scoring specialist for a category, with a deterministic
//! fallback chain: specialists by quality score, then the internal-medicine
//! department, then the first roster entry. Only an empty roster is an error.

use super::entities::{Clinician, INTERNAL_MEDICINE};
use crate::core::error::DomainError;
use crate::triage::Category;

/// Select the best-fit clinician for a category.
///
/// Ties on the quality score keep the earlier roster entry, so selection is
/// stable with respect to roster input order.
pub fn select_best(category: Category, roster: &[Clinician]) -> Result<&Clinician, DomainError> {
    if roster.is_empty() {
        return Err(DomainError::NoCliniciansAvailable);
    }

    let best_specialist = roster
        .iter()
        .filter(|clinician| clinician.covers(category))
        .fold(None::<&Clinician>, |best, candidate| match best {
            Some(current) if candidate.quality_score() <= current.quality_score() => Some(current),
            _ => Some(candidate),
        });

    if let Some(specialist) = best_specialist {
        return Ok(specialist);
    }

    Ok(roster
        .iter()
        .find(|clinician| clinician.department == INTERNAL_MEDICINE)
        .unwrap_or(&roster[0]))
}
