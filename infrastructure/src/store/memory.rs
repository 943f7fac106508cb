//! In-memory group store
//!
//! Reference adapter for the `GroupStore` port, used by tests and the demo
//! CLI. One mutex guards the whole state, so the conditional membership
//! insert and the create-with-first-member operation are atomic: the
//! capacity check and the write happen under the same lock, which is what
//! upholds the capacity invariant under concurrent admissions.
//!
//! Group creation de-duplicates by advisory key (category, department,
//! schedule-time minute bucket): a creation racing an existing open group in
//! the same bucket lands in that group while it has room. Best-effort only -
//! losing the race yields a redundant group, never an over-full one.

use async_trait::async_trait;
use cohort_application::ports::group_store::{
    GroupStore, InsertOutcome, OpenGroupQuery, StoreError,
};
use cohort_domain::{
    ClinicianId, ConsultationGroup, GroupId, GroupMember, MemberId, NewGroup, NewMember,
    QuestionnaireId, QuestionnaireReport,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

#[derive(Default)]
struct StoreState {
    questionnaires: HashMap<QuestionnaireId, QuestionnaireReport>,
    groups: HashMap<GroupId, ConsultationGroup>,
    members: HashMap<GroupId, Vec<GroupMember>>,
}

/// In-memory implementation of the persistence gateway.
#[derive(Default)]
pub struct InMemoryGroupStore {
    state: Mutex<StoreState>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All groups currently stored, scheduled-time ascending. Test and demo
    /// convenience; not part of the port.
    pub fn all_groups(&self) -> Vec<ConsultationGroup> {
        let state = self.state.lock().expect("store mutex poisoned");
        let mut groups: Vec<_> = state.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.scheduled_time.cmp(&b.scheduled_time).then(a.id.cmp(&b.id)));
        groups
    }

    /// Advisory de-duplication key for group creation.
    fn creation_bucket(group: &NewGroup) -> (String, String, i64) {
        (
            group.category.to_string(),
            group.department.clone(),
            group.scheduled_time.timestamp() / 60,
        )
    }
}

#[async_trait]
impl GroupStore for InMemoryGroupStore {
    async fn save_questionnaire(
        &self,
        report: &QuestionnaireReport,
    ) -> Result<QuestionnaireId, StoreError> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        let id = QuestionnaireId::new(Uuid::new_v4().to_string());
        state.questionnaires.insert(id.clone(), report.clone());
        Ok(id)
    }

    async fn find_open_groups(
        &self,
        query: &OpenGroupQuery,
    ) -> Result<Vec<ConsultationGroup>, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        let mut matches: Vec<_> = state
            .groups
            .values()
            .filter(|group| {
                group.is_admittable()
                    && group.category == query.category
                    && group.department == query.department
                    && group.scheduled_time >= query.window_start
                    && group.scheduled_time <= query.window_end
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.scheduled_time.cmp(&b.scheduled_time).then(a.id.cmp(&b.id)));
        Ok(matches)
    }

    async fn count_members(&self, group_id: &GroupId) -> Result<usize, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        if !state.groups.contains_key(group_id) {
            return Err(StoreError::NotFound(group_id.to_string()));
        }
        Ok(state.members.get(group_id).map_or(0, Vec::len))
    }

    async fn insert_member_if_capacity(
        &self,
        group_id: &GroupId,
        member: NewMember,
    ) -> Result<InsertOutcome, StoreError> {
        let mut state = self.state.lock().expect("store mutex poisoned");

        let Some(group) = state.groups.get(group_id) else {
            return Err(StoreError::NotFound(group_id.to_string()));
        };
        if !group.is_admittable() {
            return Ok(InsertOutcome::Full);
        }
        let max_capacity = group.max_capacity as usize;

        let rows = state.members.entry(group_id.clone()).or_default();
        if let Some(existing) = rows
            .iter()
            .find(|row| row.patient_id == member.patient_id)
        {
            return Ok(InsertOutcome::AlreadyMember(existing.clone()));
        }
        if rows.len() >= max_capacity {
            return Ok(InsertOutcome::Full);
        }

        let member = member.into_member(MemberId::new(Uuid::new_v4().to_string()), group_id.clone());
        rows.push(member.clone());
        Ok(InsertOutcome::Admitted(member))
    }

    async fn create_group_with_member(
        &self,
        group: NewGroup,
        member: NewMember,
    ) -> Result<(ConsultationGroup, GroupMember), StoreError> {
        let mut state = self.state.lock().expect("store mutex poisoned");

        // Advisory de-duplication: a concurrent first-arrival may already
        // have opened a group in this bucket; join it while it has room.
        let bucket = Self::creation_bucket(&group);
        let racing = state
            .groups
            .values()
            .filter(|candidate| {
                candidate.is_admittable()
                    && (
                        candidate.category.to_string(),
                        candidate.department.clone(),
                        candidate.scheduled_time.timestamp() / 60,
                    ) == bucket
            })
            .min_by(|a, b| a.scheduled_time.cmp(&b.scheduled_time).then(a.id.cmp(&b.id)))
            .cloned();

        if let Some(existing) = racing {
            let rows = state.members.entry(existing.id.clone()).or_default();
            let already = rows.iter().find(|row| row.patient_id == member.patient_id);
            if let Some(row) = already {
                return Ok((existing.clone(), row.clone()));
            }
            if rows.len() < existing.max_capacity as usize {
                debug!(
                    "Creation de-duplicated into racing group {} for bucket {:?}",
                    existing.id, bucket
                );
                let member =
                    member.into_member(MemberId::new(Uuid::new_v4().to_string()), existing.id.clone());
                rows.push(member.clone());
                return Ok((existing, member));
            }
        }

        let created_at = member.joined_at;
        let group = group.into_group(GroupId::new(Uuid::new_v4().to_string()), created_at);
        let member = member.into_member(MemberId::new(Uuid::new_v4().to_string()), group.id.clone());
        state.groups.insert(group.id.clone(), group.clone());
        state.members.insert(group.id.clone(), vec![member.clone()]);
        Ok((group, member))
    }

    async fn get_group(&self, group_id: &GroupId) -> Result<ConsultationGroup, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        state
            .groups
            .get(group_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(group_id.to_string()))
    }

    async fn list_members(&self, group_id: &GroupId) -> Result<Vec<GroupMember>, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        if !state.groups.contains_key(group_id) {
            return Err(StoreError::NotFound(group_id.to_string()));
        }
        let mut rows = state.members.get(group_id).cloned().unwrap_or_default();
        rows.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.joined_at.cmp(&b.joined_at))
        });
        Ok(rows)
    }

    async fn list_groups_for_clinician(
        &self,
        clinician_id: &ClinicianId,
    ) -> Result<Vec<ConsultationGroup>, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        let mut groups: Vec<_> = state
            .groups
            .values()
            .filter(|group| &group.clinician_id == clinician_id)
            .cloned()
            .collect();
        groups.sort_by(|a, b| a.scheduled_time.cmp(&b.scheduled_time).then(a.id.cmp(&b.id)));
        Ok(groups)
    }

    async fn get_questionnaire(
        &self,
        id: &QuestionnaireId,
    ) -> Result<QuestionnaireReport, StoreError> {
        let state = self.state.lock().expect("store mutex poisoned");
        state
            .questionnaires
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
