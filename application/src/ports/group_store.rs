//! Group Store port
//!
//! Defines the persistence gateway for questionnaires, consultation groups
//! and memberships. Implementations (adapters) live in the infrastructure
//! layer; any concrete store must provide this surface, and its internal
//! schema is its own business.
//!
//! The one strict requirement is [`GroupStore::insert_member_if_capacity`]:
//! it must be a single conditional write. The engine never does a
//! read-then-write pair around it, so the capacity invariant holds exactly
//! when the adapter makes that call atomic with respect to concurrent
//! inserts into the same group.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cohort_domain::{
    Category, ClinicianId, ConsultationGroup, GroupId, GroupMember, NewGroup, NewMember,
    QuestionnaireId, QuestionnaireReport,
};
use thiserror::Error;

/// Errors that can occur at the persistence boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Timeout")]
    Timeout,

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl StoreError {
    /// Whether the caller may reasonably retry the operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Timeout)
    }
}

/// Criteria for finding open groups a patient could join.
#[derive(Debug, Clone)]
pub struct OpenGroupQuery {
    pub category: Category,
    pub department: String,
    /// Closed admission window: groups scheduled in
    /// `[window_start, window_end]` qualify, both ends inclusive.
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
}

/// Result of a conditional membership insert.
#[derive(Debug)]
pub enum InsertOutcome {
    /// The member was admitted; the stored row is returned.
    Admitted(GroupMember),
    /// The group had no room (or stopped admitting) at write time.
    Full,
    /// The patient already holds a membership in this group; the existing
    /// row is returned so callers can treat the admission as idempotent.
    AlreadyMember(GroupMember),
}

/// Persistence gateway for questionnaires, groups and memberships.
#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Persist a completed questionnaire, returning its assigned id.
    async fn save_questionnaire(
        &self,
        report: &QuestionnaireReport,
    ) -> Result<QuestionnaireId, StoreError>;

    /// Find `Waiting` groups matching the query, scheduled-time ascending.
    async fn find_open_groups(
        &self,
        query: &OpenGroupQuery,
    ) -> Result<Vec<ConsultationGroup>, StoreError>;

    /// Current member count of a group.
    async fn count_members(&self, group_id: &GroupId) -> Result<usize, StoreError>;

    /// Insert a membership if - and only if - the group still has room.
    ///
    /// Must re-validate capacity at write time as one atomic step, and
    /// must report an existing membership for the same patient as
    /// [`InsertOutcome::AlreadyMember`] rather than inserting a duplicate.
    async fn insert_member_if_capacity(
        &self,
        group_id: &GroupId,
        member: NewMember,
    ) -> Result<InsertOutcome, StoreError>;

    /// Create a group and its first member as one logical unit.
    ///
    /// Adapters may de-duplicate against a concurrent creation for the same
    /// category/department/time bucket by admitting into the racing group
    /// while it has room. That de-duplication is best-effort: a lost race
    /// may yield a redundant group, never a capacity violation.
    async fn create_group_with_member(
        &self,
        group: NewGroup,
        member: NewMember,
    ) -> Result<(ConsultationGroup, GroupMember), StoreError>;

    /// Fetch a group by id.
    async fn get_group(&self, group_id: &GroupId) -> Result<ConsultationGroup, StoreError>;

    /// Members of a group, priority descending then join time ascending.
    async fn list_members(&self, group_id: &GroupId) -> Result<Vec<GroupMember>, StoreError>;

    /// Groups assigned to a clinician, scheduled-time ascending.
    async fn list_groups_for_clinician(
        &self,
        clinician_id: &ClinicianId,
    ) -> Result<Vec<ConsultationGroup>, StoreError>;

    /// Fetch a stored questionnaire by id.
    async fn get_questionnaire(
        &self,
        id: &QuestionnaireId,
    ) -> Result<QuestionnaireReport, StoreError>;
}
