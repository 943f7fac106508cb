//! Admit Patient use case.
//!
//! The group-matching core: takes a completed questionnaire, triages it,
//! picks the best-fit clinician, and places the patient into an open
//! compatible group - or atomically creates one.
//!
//! The engine holds no mutable state between calls; everything shared lives
//! behind the [`GroupStore`] port. Capacity safety rests on the store's
//! conditional insert: the pre-check via `count_members` only prunes
//! obviously full candidates, and the insert itself re-validates capacity
//! atomically. Losing that race is an expected outcome, answered by moving
//! to the next candidate or to group creation. Group creation de-duplication
//! is best-effort at the adapter (see the port docs); the capacity invariant
//! is the hard guarantee, duplicate near-empty groups are not.

use crate::config::AdmissionParams;
use crate::ports::admission_log::{AdmissionEvent, AdmissionLogger, NoAdmissionLog};
use crate::ports::group_store::{GroupStore, InsertOutcome, OpenGroupQuery, StoreError};
use crate::use_cases::shared::{check_cancelled, to_chrono, with_deadline};
use chrono::{DateTime, Utc};
use cohort_domain::{
    Category, Clinician, ConsultationGroup, GroupMember, NewGroup, NewMember, PatientId,
    PriorityScore, QuestionnaireId, QuestionnaireReport, select_best,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during admission.
#[derive(Error, Debug)]
pub enum AdmitPatientError {
    /// The injected roster was empty; there is nobody to assign.
    #[error("No clinicians available")]
    NoCliniciansAvailable,

    /// The persistence gateway failed and no group could be resolved.
    /// The underlying cause is preserved; no placeholder group is invented.
    #[error("Admission failed: {0}")]
    AdmissionFailed(#[from] StoreError),

    #[error("Operation cancelled")]
    Cancelled,
}

/// Outcome of a successful admission.
#[derive(Debug, Clone, Serialize)]
pub struct Admission {
    pub group: ConsultationGroup,
    pub member: GroupMember,
    pub category: Category,
    pub priority: PriorityScore,
    /// Whether the admission opened a new group rather than joining one.
    pub newly_created: bool,
}

/// Use case for admitting a patient into a consultation group.
///
/// Safe to call from many tasks concurrently: each invocation works only on
/// its own data plus the store, and the store's conditional insert carries
/// the capacity invariant.
pub struct AdmitPatientUseCase<S: GroupStore> {
    store: Arc<S>,
    roster: Arc<Vec<Clinician>>,
    params: AdmissionParams,
    cancellation_token: Option<CancellationToken>,
    admission_log: Arc<dyn AdmissionLogger>,
}

impl<S: GroupStore> AdmitPatientUseCase<S> {
    pub fn new(store: Arc<S>, roster: Arc<Vec<Clinician>>, params: AdmissionParams) -> Self {
        Self {
            store,
            roster,
            params,
            cancellation_token: None,
            admission_log: Arc::new(NoAdmissionLog),
        }
    }

    /// Attach a cancellation token checked between persistence steps.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Attach a structured admission logger.
    pub fn with_admission_log(mut self, logger: Arc<dyn AdmissionLogger>) -> Self {
        self.admission_log = logger;
        self
    }

    /// Admit the patient behind `report` into a group, creating one if no
    /// compatible open group has room within the admission window.
    pub async fn execute(
        &self,
        report: QuestionnaireReport,
        now: DateTime<Utc>,
    ) -> Result<Admission, AdmitPatientError> {
        check_cancelled(&self.cancellation_token)?;

        let category = Category::from_symptoms(&report.summary.main_symptoms);
        let priority = PriorityScore::from_report(&report);
        let clinician = select_best(category, &self.roster)
            .map_err(|_| AdmitPatientError::NoCliniciansAvailable)?
            .clone();

        debug!(
            "Patient {} triaged as {} (priority {}), assigned to {}",
            report.patient_id, category, priority, clinician.name
        );

        let patient_id = report.patient_id.clone();
        let questionnaire_id = with_deadline(
            self.params.store_timeout,
            self.store.save_questionnaire(&report),
        )
        .await?;

        check_cancelled(&self.cancellation_token)?;

        // Closed window: a group scheduled exactly at `now` still qualifies.
        let query = OpenGroupQuery {
            category,
            department: clinician.department.clone(),
            window_start: now,
            window_end: now + to_chrono(self.params.admission_window),
        };
        let candidates = with_deadline(
            self.params.store_timeout,
            self.store.find_open_groups(&query),
        )
        .await?;

        debug!(
            "{} open candidate group(s) for {} / {}",
            candidates.len(),
            category,
            clinician.department
        );

        if let Some(admission) = self
            .try_join_candidates(&candidates, &patient_id, &questionnaire_id, priority, now)
            .await?
        {
            self.log_admission(&admission, "joined");
            return Ok(admission);
        }

        check_cancelled(&self.cancellation_token)?;

        let draft = NewGroup {
            clinician_id: clinician.id.clone(),
            clinician_name: clinician.name.clone(),
            department: clinician.department.clone(),
            category,
            scheduled_time: now + to_chrono(self.params.schedule_offset),
            max_capacity: self.params.default_capacity,
        };
        let member = self.new_member(&patient_id, &questionnaire_id, priority, now);

        let (group, member) = with_deadline(
            self.params.store_timeout,
            self.store.create_group_with_member(draft, member),
        )
        .await?;

        info!(
            "Patient {} opened group {} for {} with {}",
            patient_id, group.id, category, group.clinician_name
        );

        let admission = Admission {
            group,
            member,
            category,
            priority,
            newly_created: true,
        };
        self.log_admission(&admission, "created");
        Ok(admission)
    }

    /// Walk candidate groups in scheduled order, attempting at most
    /// `max_insert_attempts` conditional inserts. Returns `None` when no
    /// candidate admitted the patient and creation should take over.
    async fn try_join_candidates(
        &self,
        candidates: &[ConsultationGroup],
        patient_id: &PatientId,
        questionnaire_id: &QuestionnaireId,
        priority: PriorityScore,
        now: DateTime<Utc>,
    ) -> Result<Option<Admission>, AdmitPatientError> {
        let mut attempts = 0;

        for group in candidates {
            if attempts >= self.params.max_insert_attempts {
                debug!("Insert attempt budget exhausted; falling through to creation");
                break;
            }
            check_cancelled(&self.cancellation_token)?;

            let count = with_deadline(
                self.params.store_timeout,
                self.store.count_members(&group.id),
            )
            .await?;

            if count > group.max_capacity as usize {
                // Data-integrity breach from a missed race somewhere else.
                // Treat the group as full and leave it alone; no repair here.
                warn!(
                    "Group {} holds {} members over capacity {}; excluding from admission",
                    group.id, count, group.max_capacity
                );
                self.admission_log.log(AdmissionEvent::new(
                    "capacity_integrity_warning",
                    serde_json::json!({
                        "group_id": group.id.as_str(),
                        "member_count": count,
                        "max_capacity": group.max_capacity,
                    }),
                ));
                continue;
            }
            if !group.is_admittable() || !group.has_capacity(count) {
                continue;
            }

            attempts += 1;
            let member = self.new_member(patient_id, questionnaire_id, priority, now);
            let outcome = with_deadline(
                self.params.store_timeout,
                self.store.insert_member_if_capacity(&group.id, member),
            )
            .await;

            match outcome {
                Ok(InsertOutcome::Admitted(member)) => {
                    info!("Patient {} joined group {}", patient_id, group.id);
                    return Ok(Some(Admission {
                        group: group.clone(),
                        member,
                        category: group.category,
                        priority,
                        newly_created: false,
                    }));
                }
                Ok(InsertOutcome::Full) => {
                    debug!(
                        "Group {} filled concurrently; trying next candidate",
                        group.id
                    );
                    self.admission_log.log(AdmissionEvent::new(
                        "capacity_race_lost",
                        serde_json::json!({
                            "patient_id": patient_id.as_str(),
                            "group_id": group.id.as_str(),
                        }),
                    ));
                }
                Ok(InsertOutcome::AlreadyMember(member)) => {
                    info!(
                        "Patient {} already a member of group {}; admission is idempotent",
                        patient_id, group.id
                    );
                    return Ok(Some(Admission {
                        group: group.clone(),
                        member,
                        category: group.category,
                        priority,
                        newly_created: false,
                    }));
                }
                Err(error) if error.is_retryable() => {
                    warn!(
                        "Insert into group {} failed ({}); spending the attempt and moving on",
                        group.id, error
                    );
                }
                Err(error) => return Err(error.into()),
            }
        }

        Ok(None)
    }

    fn new_member(
        &self,
        patient_id: &PatientId,
        questionnaire_id: &QuestionnaireId,
        priority: PriorityScore,
        now: DateTime<Utc>,
    ) -> NewMember {
        NewMember {
            patient_id: patient_id.clone(),
            questionnaire_id: questionnaire_id.clone(),
            priority,
            joined_at: now,
        }
    }

    fn log_admission(&self, admission: &Admission, path: &'static str) {
        self.admission_log.log(AdmissionEvent::new(
            "admission",
            serde_json::json!({
                "patient_id": admission.member.patient_id.as_str(),
                "group_id": admission.group.id.as_str(),
                "clinician_id": admission.group.clinician_id.as_str(),
                "category": admission.category.as_str(),
                "priority": admission.priority.value(),
                "path": path,
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_domain::{
        ClinicianId, GroupId, GroupStatus, MemberId, QuestionnaireSummary, INTERNAL_MEDICINE,
    };
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    // ==================== Test Mocks ====================

    /// Scripted behavior for the next conditional insert.
    enum InsertScript {
        Admit,
        Full,
        AlreadyMember,
        FailConnection,
        Hang,
    }

    #[derive(Default)]
    struct MockStore {
        open_groups: Vec<ConsultationGroup>,
        counts: HashMap<String, usize>,
        insert_script: Mutex<VecDeque<InsertScript>>,
        insert_calls: AtomicUsize,
        create_calls: AtomicUsize,
        fail_save: bool,
        fail_find: bool,
        last_query: Mutex<Option<OpenGroupQuery>>,
    }

    impl MockStore {
        fn new() -> Self {
            Self::default()
        }

        fn with_groups(mut self, groups: Vec<ConsultationGroup>) -> Self {
            self.open_groups = groups;
            self
        }

        fn with_count(mut self, group_id: &str, count: usize) -> Self {
            self.counts.insert(group_id.to_string(), count);
            self
        }

        fn with_insert_script(self, script: Vec<InsertScript>) -> Self {
            *self.insert_script.lock().unwrap() = script.into();
            self
        }

        fn failing_save(mut self) -> Self {
            self.fail_save = true;
            self
        }

        fn failing_find(mut self) -> Self {
            self.fail_find = true;
            self
        }
    }

    #[async_trait::async_trait]
    impl GroupStore for MockStore {
        async fn save_questionnaire(
            &self,
            _report: &QuestionnaireReport,
        ) -> Result<QuestionnaireId, StoreError> {
            if self.fail_save {
                return Err(StoreError::Connection("database unreachable".to_string()));
            }
            Ok(QuestionnaireId::new("q-1"))
        }

        async fn find_open_groups(
            &self,
            query: &OpenGroupQuery,
        ) -> Result<Vec<ConsultationGroup>, StoreError> {
            if self.fail_find {
                return Err(StoreError::Connection("database unreachable".to_string()));
            }
            *self.last_query.lock().unwrap() = Some(query.clone());
            Ok(self.open_groups.clone())
        }

        async fn count_members(&self, group_id: &GroupId) -> Result<usize, StoreError> {
            Ok(*self.counts.get(group_id.as_str()).unwrap_or(&0))
        }

        async fn insert_member_if_capacity(
            &self,
            group_id: &GroupId,
            member: NewMember,
        ) -> Result<InsertOutcome, StoreError> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            let script = self.insert_script.lock().unwrap().pop_front();
            match script.unwrap_or(InsertScript::Full) {
                InsertScript::Admit => Ok(InsertOutcome::Admitted(
                    member.into_member(MemberId::new("m-1"), group_id.clone()),
                )),
                InsertScript::Full => Ok(InsertOutcome::Full),
                InsertScript::AlreadyMember => Ok(InsertOutcome::AlreadyMember(
                    member.into_member(MemberId::new("m-existing"), group_id.clone()),
                )),
                InsertScript::FailConnection => {
                    Err(StoreError::Connection("database unreachable".to_string()))
                }
                InsertScript::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(InsertOutcome::Full)
                }
            }
        }

        async fn create_group_with_member(
            &self,
            group: NewGroup,
            member: NewMember,
        ) -> Result<(ConsultationGroup, GroupMember), StoreError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            let created_at = member.joined_at;
            let group = group.into_group(GroupId::new("g-new"), created_at);
            let member = member.into_member(MemberId::new("m-new"), group.id.clone());
            Ok((group, member))
        }

        async fn get_group(&self, group_id: &GroupId) -> Result<ConsultationGroup, StoreError> {
            self.open_groups
                .iter()
                .find(|group| &group.id == group_id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(group_id.to_string()))
        }

        async fn list_members(&self, _group_id: &GroupId) -> Result<Vec<GroupMember>, StoreError> {
            Ok(Vec::new())
        }

        async fn list_groups_for_clinician(
            &self,
            _clinician_id: &ClinicianId,
        ) -> Result<Vec<ConsultationGroup>, StoreError> {
            Ok(Vec::new())
        }

        async fn get_questionnaire(
            &self,
            id: &QuestionnaireId,
        ) -> Result<QuestionnaireReport, StoreError> {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    // ==================== Test Fixtures ====================

    fn roster() -> Arc<Vec<Clinician>> {
        Arc::new(vec![
            Clinician::new(
                "dr-resp",
                "Tanaka",
                INTERNAL_MEDICINE,
                vec![Category::RespiratoryInfectious, Category::GeneralInternal],
                15,
                4.8,
            ),
            Clinician::new(
                "dr-derm",
                "Sato",
                "dermatology",
                vec![Category::Dermatologic],
                12,
                4.9,
            ),
        ])
    }

    fn respiratory_report(patient: &str) -> QuestionnaireReport {
        QuestionnaireReport::new(
            patient,
            QuestionnaireSummary {
                main_symptoms: "38度の発熱と咳".to_string(),
                severity: "中等度".to_string(),
                duration: "2-3日前から".to_string(),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    fn waiting_group(id: &str, now: DateTime<Utc>, max_capacity: u32) -> ConsultationGroup {
        ConsultationGroup {
            id: GroupId::new(id),
            clinician_id: ClinicianId::new("dr-resp"),
            clinician_name: "Tanaka".to_string(),
            department: INTERNAL_MEDICINE.to_string(),
            category: Category::RespiratoryInfectious,
            status: GroupStatus::Waiting,
            scheduled_time: now + chrono::Duration::seconds(30),
            max_capacity,
            created_at: now,
        }
    }

    fn use_case(store: Arc<MockStore>) -> AdmitPatientUseCase<MockStore> {
        AdmitPatientUseCase::new(store, roster(), AdmissionParams::default())
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_creates_group_when_no_candidates() {
        let now = Utc::now();
        let store = Arc::new(MockStore::new());
        let admission = use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), now)
            .await
            .unwrap();

        assert!(admission.newly_created);
        assert_eq!(admission.category, Category::RespiratoryInfectious);
        assert_eq!(admission.priority.value(), 3);
        assert_eq!(admission.group.scheduled_time, now + chrono::Duration::seconds(60));
        assert_eq!(admission.group.max_capacity, 8);
        assert_eq!(admission.group.status, GroupStatus::Waiting);
        assert_eq!(admission.member.group_id, admission.group.id);
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_joins_open_group_with_room() {
        let now = Utc::now();
        let store = Arc::new(
            MockStore::new()
                .with_groups(vec![waiting_group("g-1", now, 8)])
                .with_count("g-1", 3)
                .with_insert_script(vec![InsertScript::Admit]),
        );

        let admission = use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), now)
            .await
            .unwrap();

        assert!(!admission.newly_created);
        assert_eq!(admission.group.id.as_str(), "g-1");
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_admission_window_is_closed_interval_from_now() {
        let now = Utc::now();
        let store = Arc::new(MockStore::new());
        use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), now)
            .await
            .unwrap();

        let query = store.last_query.lock().unwrap().clone().unwrap();
        assert_eq!(query.window_start, now);
        assert_eq!(query.window_end, now + chrono::Duration::seconds(120));
        assert_eq!(query.category, Category::RespiratoryInfectious);
        assert_eq!(query.department, INTERNAL_MEDICINE);
    }

    #[tokio::test]
    async fn test_lost_capacity_race_moves_to_next_candidate() {
        let now = Utc::now();
        let store = Arc::new(
            MockStore::new()
                .with_groups(vec![waiting_group("g-1", now, 8), waiting_group("g-2", now, 8)])
                .with_insert_script(vec![InsertScript::Full, InsertScript::Admit]),
        );

        let admission = use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), now)
            .await
            .unwrap();

        assert!(!admission.newly_created);
        assert_eq!(admission.group.id.as_str(), "g-2");
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_all_races_lost_falls_through_to_creation() {
        let now = Utc::now();
        let store = Arc::new(
            MockStore::new()
                .with_groups(vec![waiting_group("g-1", now, 8), waiting_group("g-2", now, 8)])
                .with_insert_script(vec![InsertScript::Full, InsertScript::Full]),
        );

        let admission = use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), now)
            .await
            .unwrap();

        assert!(admission.newly_created);
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_insert_attempts_are_bounded() {
        let now = Utc::now();
        let groups: Vec<ConsultationGroup> = (0..5)
            .map(|i| waiting_group(&format!("g-{i}"), now, 8))
            .collect();
        let store = Arc::new(MockStore::new().with_groups(groups));

        let use_case = AdmitPatientUseCase::new(
            Arc::clone(&store),
            roster(),
            AdmissionParams::default().with_max_insert_attempts(2),
        );
        let admission = use_case.execute(respiratory_report("p1"), now).await.unwrap();

        assert!(admission.newly_created);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_full_precheck_skips_group_without_insert() {
        let now = Utc::now();
        let store = Arc::new(
            MockStore::new()
                .with_groups(vec![waiting_group("g-full", now, 4)])
                .with_count("g-full", 4),
        );

        let admission = use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), now)
            .await
            .unwrap();

        assert!(admission.newly_created);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_over_capacity_group_is_excluded_not_repaired() {
        let now = Utc::now();
        // Count above capacity signals a missed race; the group is skipped.
        let store = Arc::new(
            MockStore::new()
                .with_groups(vec![waiting_group("g-broken", now, 4)])
                .with_count("g-broken", 5),
        );

        let admission = use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), now)
            .await
            .unwrap();

        assert!(admission.newly_created);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_existing_membership_is_idempotent() {
        let now = Utc::now();
        let store = Arc::new(
            MockStore::new()
                .with_groups(vec![waiting_group("g-1", now, 8)])
                .with_insert_script(vec![InsertScript::AlreadyMember]),
        );

        let admission = use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), now)
            .await
            .unwrap();

        assert!(!admission.newly_created);
        assert_eq!(admission.member.id.as_str(), "m-existing");
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_roster_is_surfaced() {
        let store = Arc::new(MockStore::new());
        let use_case = AdmitPatientUseCase::new(
            store,
            Arc::new(Vec::new()),
            AdmissionParams::default(),
        );

        let result = use_case.execute(respiratory_report("p1"), Utc::now()).await;
        assert!(matches!(result, Err(AdmitPatientError::NoCliniciansAvailable)));
    }

    #[tokio::test]
    async fn test_save_failure_wraps_cause_and_creates_nothing() {
        let store = Arc::new(MockStore::new().failing_save());
        let result = use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), Utc::now())
            .await;

        match result {
            Err(AdmitPatientError::AdmissionFailed(StoreError::Connection(_))) => {}
            other => panic!("expected wrapped connection error, got {other:?}"),
        }
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_find_failure_is_not_masked_by_a_fallback_group() {
        let store = Arc::new(MockStore::new().failing_find());
        let result = use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), Utc::now())
            .await;

        assert!(matches!(result, Err(AdmitPatientError::AdmissionFailed(_))));
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_retryable_insert_error_propagates() {
        let now = Utc::now();
        let store = Arc::new(
            MockStore::new()
                .with_groups(vec![waiting_group("g-1", now, 8)])
                .with_insert_script(vec![InsertScript::FailConnection]),
        );

        let result = use_case(Arc::clone(&store))
            .execute(respiratory_report("p1"), now)
            .await;

        assert!(matches!(result, Err(AdmitPatientError::AdmissionFailed(_))));
        assert_eq!(store.create_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_insert_timeout_spends_attempt_and_falls_through() {
        let now = Utc::now();
        let store = Arc::new(
            MockStore::new()
                .with_groups(vec![waiting_group("g-1", now, 8)])
                .with_insert_script(vec![InsertScript::Hang]),
        );

        let use_case = AdmitPatientUseCase::new(
            Arc::clone(&store),
            roster(),
            AdmissionParams::default().with_store_timeout(Some(Duration::from_millis(20))),
        );
        let admission = use_case.execute(respiratory_report("p1"), now).await.unwrap();

        assert!(admission.newly_created);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 1);
    }

    #[derive(Default)]
    struct RecordingLog {
        events: Mutex<Vec<(&'static str, serde_json::Value)>>,
    }

    impl AdmissionLogger for RecordingLog {
        fn log(&self, event: AdmissionEvent) {
            self.events
                .lock()
                .unwrap()
                .push((event.event_type, event.payload));
        }
    }

    #[tokio::test]
    async fn test_audit_log_records_race_loss_and_admission() {
        let now = Utc::now();
        let store = Arc::new(
            MockStore::new()
                .with_groups(vec![waiting_group("g-1", now, 8), waiting_group("g-2", now, 8)])
                .with_insert_script(vec![InsertScript::Full, InsertScript::Admit]),
        );
        let log = Arc::new(RecordingLog::default());

        use_case(store)
            .with_admission_log(Arc::clone(&log) as Arc<dyn AdmissionLogger>)
            .execute(respiratory_report("p1"), now)
            .await
            .unwrap();

        let events = log.events.lock().unwrap();
        let types: Vec<_> = events.iter().map(|(event_type, _)| *event_type).collect();
        assert_eq!(types, vec!["capacity_race_lost", "admission"]);

        let (_, admission) = &events[1];
        assert_eq!(admission["path"], "joined");
        assert_eq!(admission["group_id"], "g-2");
        assert_eq!(admission["priority"], 3);
    }

    #[tokio::test]
    async fn test_cancellation_short_circuits() {
        let token = CancellationToken::new();
        token.cancel();

        let store = Arc::new(MockStore::new());
        let use_case = use_case(store).with_cancellation_token(token);

        let result = use_case.execute(respiratory_report("p1"), Utc::now()).await;
        assert!(matches!(result, Err(AdmitPatientError::Cancelled)));
    }
}
