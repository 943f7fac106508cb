//! Questionnaire entities
//!
//! A [`QuestionnaireReport`] is the immutable record of a completed symptom
//! intake. It is created once per patient per visit by the intake collaborator
//! and never mutated afterwards; the admission engine only reads it.

use super::value_objects::PatientId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single raw question/answer pair from the intake conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireResponse {
    pub question_id: String,
    pub answer: String,
    pub answered_at: DateTime<Utc>,
}

/// Condensed free-text summary of the intake.
///
/// All fields are free text as entered or transcribed; the triage logic
/// keys off `main_symptoms`, `severity` and `duration`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionnaireSummary {
    pub main_symptoms: String,
    pub severity: String,
    pub duration: String,
    pub current_medications: String,
    pub allergies: String,
    pub previous_treatment: String,
    pub additional_notes: String,
}

/// Completed patient symptom questionnaire (Entity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionnaireReport {
    pub patient_id: PatientId,
    pub summary: QuestionnaireSummary,
    #[serde(default)]
    pub responses: Vec<QuestionnaireResponse>,
    pub generated_at: DateTime<Utc>,
}

impl QuestionnaireReport {
    pub fn new(
        patient_id: impl Into<PatientId>,
        summary: QuestionnaireSummary,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            summary,
            responses: Vec::new(),
            generated_at,
        }
    }

    pub fn with_responses(mut self, responses: Vec<QuestionnaireResponse>) -> Self {
        self.responses = responses;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_report_carries_raw_responses() {
        let now = Utc::now();
        let report = QuestionnaireReport::new(
            "p1",
            QuestionnaireSummary {
                main_symptoms: "発熱".to_string(),
                ..Default::default()
            },
            now,
        )
        .with_responses(vec![QuestionnaireResponse {
            question_id: "q-symptoms".to_string(),
            answer: "発熱があります".to_string(),
            answered_at: now,
        }]);

        assert_eq!(report.responses.len(), 1);
        assert_eq!(report.responses[0].question_id, "q-symptoms");
    }
}
