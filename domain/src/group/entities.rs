//! Consultation group entities
//!
//! A [`ConsultationGroup`] is a time- and capacity-bounded batch of patients
//! sharing a symptom category and an assigned clinician. The group owns its
//! member list for capacity accounting; a [`GroupMember`] only references its
//! questionnaire by id. Capacity invariant: the member count never exceeds
//! `max_capacity`, and only `Waiting` groups admit new members. Status moves
//! to `InProgress`/`Completed` by the external session-runner, never here.

use crate::clinician::ClinicianId;
use crate::questionnaire::{PatientId, QuestionnaireId};
use crate::triage::{Category, PriorityScore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a consultation group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for GroupId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a group membership row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for MemberId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of a consultation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    Waiting,
    InProgress,
    Completed,
}

impl std::fmt::Display for GroupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GroupStatus::Waiting => "waiting",
            GroupStatus::InProgress => "in_progress",
            GroupStatus::Completed => "completed",
        };
        write!(f, "{}", s)
    }
}

/// A scheduled group consultation session (Entity).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationGroup {
    pub id: GroupId,
    pub clinician_id: ClinicianId,
    pub clinician_name: String,
    pub department: String,
    pub category: Category,
    pub status: GroupStatus,
    pub scheduled_time: DateTime<Utc>,
    pub max_capacity: u32,
    pub created_at: DateTime<Utc>,
}

impl ConsultationGroup {
    /// Whether the group can admit members at all (status gate).
    pub fn is_admittable(&self) -> bool {
        self.status == GroupStatus::Waiting
    }

    /// Whether a group with the given member count has room for one more.
    pub fn has_capacity(&self, member_count: usize) -> bool {
        member_count < self.max_capacity as usize
    }
}

/// Draft for a group about to be created; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub clinician_id: ClinicianId,
    pub clinician_name: String,
    pub department: String,
    pub category: Category,
    pub scheduled_time: DateTime<Utc>,
    pub max_capacity: u32,
}

impl NewGroup {
    /// Materialize into a full group record with a store-assigned id.
    /// New groups always start out `Waiting`.
    pub fn into_group(self, id: GroupId, created_at: DateTime<Utc>) -> ConsultationGroup {
        ConsultationGroup {
            id,
            clinician_id: self.clinician_id,
            clinician_name: self.clinician_name,
            department: self.department,
            category: self.category,
            status: GroupStatus::Waiting,
            scheduled_time: self.scheduled_time,
            max_capacity: self.max_capacity,
            created_at,
        }
    }
}

/// A patient's membership in a consultation group (Entity).
///
/// Created exactly once per patient per group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: MemberId,
    pub group_id: GroupId,
    pub patient_id: PatientId,
    pub questionnaire_id: QuestionnaireId,
    pub priority: PriorityScore,
    pub joined_at: DateTime<Utc>,
}

/// Draft for a membership about to be inserted; the store assigns the id
/// and binds it to the target group.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub patient_id: PatientId,
    pub questionnaire_id: QuestionnaireId,
    pub priority: PriorityScore,
    pub joined_at: DateTime<Utc>,
}

impl NewMember {
    /// Materialize into a full membership row bound to a group.
    pub fn into_member(self, id: MemberId, group_id: GroupId) -> GroupMember {
        GroupMember {
            id,
            group_id,
            patient_id: self.patient_id,
            questionnaire_id: self.questionnaire_id,
            priority: self.priority,
            joined_at: self.joined_at,
        }
    }
}
