//! Summarize Group use case.
//!
//! Builds the clinician-facing report for one consultation group: fetches
//! the member roster and their questionnaires, then reduces them with the
//! domain aggregator. Read-only; the group is never touched.

use crate::ports::group_store::{GroupStore, StoreError};
use cohort_domain::{ConsultationGroup, GroupId, GroupSummary, QuestionnaireReport, summarize};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while summarizing a group.
#[derive(Error, Debug)]
pub enum SummarizeGroupError {
    #[error("Group not found: {0}")]
    GroupNotFound(GroupId),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// A group together with its aggregate summary.
#[derive(Debug, Clone, Serialize)]
pub struct GroupReport {
    pub group: ConsultationGroup,
    pub summary: GroupSummary,
}

/// Use case for producing a group's clinician-facing summary.
pub struct SummarizeGroupUseCase<S: GroupStore> {
    store: Arc<S>,
}

impl<S: GroupStore> SummarizeGroupUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Summarize the group. An empty group yields a zero-patient summary,
    /// not an error; a member whose questionnaire went missing keeps its
    /// roster slot with empty detail fields.
    pub async fn execute(&self, group_id: &GroupId) -> Result<GroupReport, SummarizeGroupError> {
        let group = match self.store.get_group(group_id).await {
            Ok(group) => group,
            Err(StoreError::NotFound(_)) => {
                return Err(SummarizeGroupError::GroupNotFound(group_id.clone()));
            }
            Err(error) => return Err(error.into()),
        };

        let members = self.store.list_members(group_id).await?;
        debug!("Summarizing group {} with {} member(s)", group_id, members.len());

        let lookups = members.iter().map(|member| {
            let store = Arc::clone(&self.store);
            let id = member.questionnaire_id.clone();
            async move {
                let result = store.get_questionnaire(&id).await;
                (id, result)
            }
        });

        let mut questionnaires: HashMap<_, QuestionnaireReport> = HashMap::new();
        for (id, result) in futures::future::join_all(lookups).await {
            match result {
                Ok(report) => {
                    questionnaires.insert(id, report);
                }
                Err(StoreError::NotFound(_)) => {
                    warn!("Questionnaire {} missing for group {}", id, group_id);
                }
                Err(error) => return Err(error.into()),
            }
        }

        let summary = summarize(&members, &questionnaires);
        Ok(GroupReport { group, summary })
    }
}
