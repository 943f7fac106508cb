//! Triage domain - symptom categorization and urgency scoring
//!
//! Both operations are pure, total functions over a questionnaire: every
//! input maps to some category and every report gets a score in `[1, 5]`.

pub mod category;
pub mod priority;

pub use category::Category;
pub use priority::PriorityScore;
