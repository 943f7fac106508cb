//! Clinician Schedule use case.
//!
//! Lists a clinician's assigned groups with their current member counts,
//! scheduled-time ascending, for the session-runner's worklist view.

use crate::ports::group_store::{GroupStore, StoreError};
use cohort_domain::{ClinicianId, ConsultationGroup};
use serde::Serialize;
use std::sync::Arc;

/// A scheduled group with its current occupancy.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledGroup {
    pub group: ConsultationGroup,
    pub member_count: usize,
}

/// Use case for listing a clinician's scheduled groups.
pub struct ClinicianScheduleUseCase<S: GroupStore> {
    store: Arc<S>,
}

impl<S: GroupStore> ClinicianScheduleUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        clinician_id: &ClinicianId,
    ) -> Result<Vec<ScheduledGroup>, StoreError> {
        let groups = self.store.list_groups_for_clinician(clinician_id).await?;

        let mut schedule = Vec::with_capacity(groups.len());
        for group in groups {
            let member_count = self.store.count_members(&group.id).await?;
            schedule.push(ScheduledGroup {
                group,
                member_count,
            });
        }

        Ok(schedule)
    }
}
