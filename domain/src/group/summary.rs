//! Group summary aggregation
//!
//! Reduces a group's member roster and their questionnaires into aggregate
//! statistics and a clinician-facing report structure. Pure reduction: no
//! I/O, inputs untouched, and the same inputs always produce the same
//! output (frequency tables are ordered maps).

use super::entities::GroupMember;
use crate::questionnaire::{PatientId, QuestionnaireId, QuestionnaireReport};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Symptom free text lists symptoms separated by the Japanese enumeration
/// comma; plain commas are accepted too.
const SYMPTOM_DELIMITERS: [char; 2] = ['、', ','];

/// Per-member compact listing for the clinician report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberDetail {
    pub patient_id: PatientId,
    pub symptoms: String,
    pub severity: String,
    pub duration: String,
    pub medications: String,
    pub allergies: String,
    pub priority: u8,
}

/// Aggregate statistics over one consultation group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub total_members: usize,
    pub symptom_counts: BTreeMap<String, usize>,
    pub severity_counts: BTreeMap<String, usize>,
    pub duration_counts: BTreeMap<String, usize>,
    /// Patients with priority >= 4, in member order, for triage attention.
    pub urgent_patients: Vec<PatientId>,
    pub member_details: Vec<MemberDetail>,
}

impl GroupSummary {
    /// Summary of an empty group: zero patients, nothing to report.
    pub fn empty() -> Self {
        Self {
            total_members: 0,
            symptom_counts: BTreeMap::new(),
            severity_counts: BTreeMap::new(),
            duration_counts: BTreeMap::new(),
            urgent_patients: Vec::new(),
            member_details: Vec::new(),
        }
    }

    /// The most frequent symptom tokens, count descending, ties by token
    /// order for determinism.
    pub fn top_symptoms(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .symptom_counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries.truncate(limit);
        entries
    }
}

/// Reduce a member roster and its questionnaires into a [`GroupSummary`].
///
/// A member whose questionnaire is absent from the map still counts toward
/// the total and the urgent list; its detail fields stay empty.
pub fn summarize(
    members: &[GroupMember],
    questionnaires: &HashMap<QuestionnaireId, QuestionnaireReport>,
) -> GroupSummary {
    if members.is_empty() {
        return GroupSummary::empty();
    }

    let mut summary = GroupSummary {
        total_members: members.len(),
        ..GroupSummary::empty()
    };

    for member in members {
        if member.priority.is_urgent() {
            summary.urgent_patients.push(member.patient_id.clone());
        }

        let Some(report) = questionnaires.get(&member.questionnaire_id) else {
            summary.member_details.push(MemberDetail {
                patient_id: member.patient_id.clone(),
                symptoms: String::new(),
                severity: String::new(),
                duration: String::new(),
                medications: String::new(),
                allergies: String::new(),
                priority: member.priority.value(),
            });
            continue;
        };

        let intake = &report.summary;

        for token in intake.main_symptoms.split(SYMPTOM_DELIMITERS.as_slice()) {
            let token = token.trim();
            if !token.is_empty() {
                *summary.symptom_counts.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        if !intake.severity.is_empty() {
            *summary
                .severity_counts
                .entry(intake.severity.clone())
                .or_insert(0) += 1;
        }

        if !intake.duration.is_empty() {
            *summary
                .duration_counts
                .entry(intake.duration.clone())
                .or_insert(0) += 1;
        }

        summary.member_details.push(MemberDetail {
            patient_id: member.patient_id.clone(),
            symptoms: intake.main_symptoms.clone(),
            severity: intake.severity.clone(),
            duration: intake.duration.clone(),
            medications: intake.current_medications.clone(),
            allergies: intake.allergies.clone(),
            priority: member.priority.value(),
        });
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::entities::{GroupId, MemberId};
    use crate::questionnaire::{QuestionnaireReport, QuestionnaireSummary};
    use crate::triage::PriorityScore;
    use chrono::Utc;

    fn member(patient: &str, questionnaire: &str, priority: u8) -> GroupMember {
        GroupMember {
            id: MemberId::new(format!("m-{patient}")),
            group_id: GroupId::new("g-1"),
            patient_id: PatientId::new(patient),
            questionnaire_id: QuestionnaireId::new(questionnaire),
            priority: PriorityScore::new(priority),
            joined_at: Utc::now(),
        }
    }

    fn report(patient: &str, symptoms: &str, severity: &str, duration: &str) -> QuestionnaireReport {
        QuestionnaireReport::new(
            patient,
            QuestionnaireSummary {
                main_symptoms: symptoms.to_string(),
                severity: severity.to_string(),
                duration: duration.to_string(),
                current_medications: "なし".to_string(),
                allergies: "なし".to_string(),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    fn questionnaires(
        entries: Vec<(&str, QuestionnaireReport)>,
    ) -> HashMap<QuestionnaireId, QuestionnaireReport> {
        entries
            .into_iter()
            .map(|(id, report)| (QuestionnaireId::new(id), report))
            .collect()
    }

    #[test]
    fn test_empty_group_yields_zero_summary() {
        let summary = summarize(&[], &HashMap::new());
        assert_eq!(summary.total_members, 0);
        assert!(summary.symptom_counts.is_empty());
        assert!(summary.urgent_patients.is_empty());
        assert!(summary.member_details.is_empty());
    }

    #[test]
    fn test_symptom_tokens_are_split_and_counted() {
        let members = vec![member("p1", "q1", 3), member("p2", "q2", 2)];
        let questionnaires = questionnaires(vec![
            ("q1", report("p1", "発熱、咳", "中等度", "2-3日前から")),
            ("q2", report("p2", "咳、のどの痛み", "軽度", "昨日から")),
        ]);

        let summary = summarize(&members, &questionnaires);

        assert_eq!(summary.total_members, 2);
        assert_eq!(summary.symptom_counts["咳"], 2);
        assert_eq!(summary.symptom_counts["発熱"], 1);
        assert_eq!(summary.symptom_counts["のどの痛み"], 1);
        assert_eq!(summary.severity_counts["中等度"], 1);
        assert_eq!(summary.duration_counts["昨日から"], 1);
    }

    #[test]
    fn test_urgent_patients_listed_in_member_order() {
        let members = vec![member("p1", "q1", 5), member("p2", "q2", 2), member("p3", "q3", 4)];
        let questionnaires = questionnaires(vec![
            ("q1", report("p1", "胸の痛み", "重度", "昨日から")),
            ("q2", report("p2", "咳", "軽度", "昨日から")),
            ("q3", report("p3", "頭痛", "重度", "1週間前から")),
        ]);

        let summary = summarize(&members, &questionnaires);

        assert_eq!(
            summary.urgent_patients,
            vec![PatientId::new("p1"), PatientId::new("p3")]
        );
    }

    #[test]
    fn test_member_without_questionnaire_keeps_count_and_urgency() {
        let members = vec![member("p1", "q-missing", 4)];

        let summary = summarize(&members, &HashMap::new());

        assert_eq!(summary.total_members, 1);
        assert_eq!(summary.urgent_patients, vec![PatientId::new("p1")]);
        assert_eq!(summary.member_details.len(), 1);
        assert!(summary.member_details[0].symptoms.is_empty());
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let members = vec![member("p1", "q1", 3), member("p2", "q2", 5)];
        let questionnaires = questionnaires(vec![
            ("q1", report("p1", "発熱、咳、頭痛", "中等度", "2-3日前から")),
            ("q2", report("p2", "胸の痛み", "重度", "それ以上前から")),
        ]);

        let first = summarize(&members, &questionnaires);
        let second = summarize(&members, &questionnaires);

        assert_eq!(first, second);
    }

    #[test]
    fn test_top_symptoms_orders_by_count_then_token() {
        let members = vec![member("p1", "q1", 1), member("p2", "q2", 1), member("p3", "q3", 1)];
        let questionnaires = questionnaires(vec![
            ("q1", report("p1", "咳、発熱", "軽度", "昨日から")),
            ("q2", report("p2", "咳", "軽度", "昨日から")),
            ("q3", report("p3", "発熱", "軽度", "昨日から")),
        ]);

        let summary = summarize(&members, &questionnaires);
        let top = summary.top_symptoms(2);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].1, 2);
        assert_eq!(top[1].1, 2);
        // Equal counts order by token, deterministically
        assert!(top[0].0 < top[1].0);
    }
}
