//! Questionnaire domain - completed patient intake records

pub mod entities;
pub mod value_objects;

pub use entities::{QuestionnaireReport, QuestionnaireResponse, QuestionnaireSummary};
pub use value_objects::{PatientId, QuestionnaireId};
