//! Последовательный трекер шагов процесса тендера
//!
//! `ProcessState` — чистая машина состояний без ввода-вывода; её держит
//! view model фронтенда в сигнале. `StepTracker` связывает её с хранилищами
//! и используется там, где удобно владеть всем сразу.

use chrono::NaiveDateTime;
use log::{debug, info, warn};
use thiserror::Error;

use super::aggregate::{
    ProcessStepState, StepFields, StepKey, StepSchema, StepStamp, TenderId, TENDER_PROCESS_STEPS,
};
use super::dto::{ParentRecordUpdate, SavedStepRecord, StepSubmission};
use super::form::{field, FieldError, StepForm, ValidationErrors};
use super::store::{ParentRecordStore, ProcessStore, StoreError};
use crate::shared::validation::{DATE_FORMAT, TIME_FORMAT};

/// Заметка, которую получают шаги без собственного поля notes
const DEFAULT_NOTES: &str = "passed";

// ============================================================================
// Phases and errors
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    Loading,
    AwaitingInput(usize),
    Submitting(usize),
    /// Все шаги пройдены; терминальное состояние
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to load tender process: {0}")]
pub struct LoadError(pub StoreError);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistError {
    #[error("Failed to save step data: {0}")]
    Step(StoreError),

    #[error("Failed to update tender record: {0}")]
    Parent(StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Persist(#[from] PersistError),

    #[error("Step input is not accepted in phase {0:?}")]
    NotAwaitingInput(TrackerPhase),

    #[error("No submission in flight for step {0}")]
    NoSubmissionInFlight(usize),
}

/// Результат успешной отправки шага
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Текущим стал шаг с этим индексом
    Advanced(usize),
    ProcessComplete,
}

// ============================================================================
// Pure state
// ============================================================================

/// Текущий шаг вместе с его схемой полей
#[derive(Debug, Clone, Copy)]
pub struct CurrentStep<'a> {
    pub index: usize,
    pub step: &'a ProcessStepState,
    pub schema: StepSchema,
}

/// Проверенная отправка, ожидающая сетевых вызовов
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedSubmission {
    pub index: usize,
    pub key: StepKey,
    pub fields: StepFields,
    pub stamp: StepStamp,
    pub submission: StepSubmission,
    pub parent_update: Option<ParentRecordUpdate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessState {
    steps: Vec<ProcessStepState>,
    current: usize,
    phase: TrackerPhase,
}

impl ProcessState {
    /// Пустой список шагов до окончания загрузки
    pub fn loading() -> Self {
        Self {
            steps: TENDER_PROCESS_STEPS.iter().map(ProcessStepState::new).collect(),
            current: 0,
            phase: TrackerPhase::Loading,
        }
    }

    /// Все шаги не пройдены, текущий — первый
    pub fn fresh() -> Self {
        Self {
            phase: TrackerPhase::AwaitingInput(0),
            ..Self::loading()
        }
    }

    /// Слить сохранённые записи с определениями шагов
    pub fn from_saved(records: &[SavedStepRecord]) -> Self {
        for record in records {
            if StepKey::parse(&record.key).is_none() {
                warn!("Ignoring saved record with unknown step key '{}'", record.key);
            }
        }

        let mut seen_incomplete = false;
        let steps: Vec<ProcessStepState> = TENDER_PROCESS_STEPS
            .iter()
            .map(|definition| {
                let mut step = records
                    .iter()
                    .find(|r| r.key == definition.key.as_str())
                    .map(|r| r.merge_onto(definition))
                    .unwrap_or_else(|| ProcessStepState::new(definition));
                if seen_incomplete && step.completed {
                    warn!(
                        "Step '{}' is saved as completed after an incomplete step; loading it as incomplete",
                        step.key
                    );
                    step.completed = false;
                }
                seen_incomplete |= !step.completed;
                step
            })
            .collect();

        let first_incomplete = steps.iter().position(|s| !s.completed);
        let (current, phase) = match first_incomplete {
            Some(i) => (i, TrackerPhase::AwaitingInput(i)),
            None => (steps.len() - 1, TrackerPhase::Complete),
        };

        Self {
            steps,
            current,
            phase,
        }
    }

    pub fn steps(&self) -> &[ProcessStepState] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == TrackerPhase::Complete
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, TrackerPhase::Submitting(_))
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    /// Перейти в `Loading` перед повторной загрузкой
    ///
    /// Пока шаг отправляется, перезагрузка игнорируется и возвращается `false`.
    pub fn begin_reload(&mut self) -> bool {
        if self.is_submitting() {
            debug!("Reload ignored: step #{} is being submitted", self.current);
            return false;
        }
        *self = Self::loading();
        true
    }

    pub fn current_step(&self) -> CurrentStep<'_> {
        let step = &self.steps[self.current];
        CurrentStep {
            index: self.current,
            step,
            schema: step.schema(),
        }
    }

    /// Проверить ввод и перевести трекер в `Submitting`
    ///
    /// При ошибке состояние не меняется.
    pub fn begin_submit(
        &mut self,
        tender_id: &TenderId,
        form: &StepForm,
        now: NaiveDateTime,
    ) -> Result<PreparedSubmission, SubmitError> {
        let index = match self.phase {
            TrackerPhase::AwaitingInput(i) => i,
            other => return Err(SubmitError::NotAwaitingInput(other)),
        };
        let step = &self.steps[index];

        if form.schema() != step.schema() {
            return Err(ValidationErrors(vec![FieldError {
                field: field::FORM,
                message: format!("{} expects {:?} input", step.label, step.schema()),
            }])
            .into());
        }

        let fields = form.validate(now)?;
        let stamp = match &fields {
            StepFields::General(f) => StepStamp {
                notes: f.notes.clone(),
                date: f.date.clone(),
                time: f.time.clone(),
            },
            _ => StepStamp {
                notes: DEFAULT_NOTES.to_string(),
                date: now.format(DATE_FORMAT).to_string(),
                time: now.format(TIME_FORMAT).to_string(),
            },
        };

        let mut submission = StepSubmission {
            tender_id: tender_id.value().to_string(),
            step_key: step.key.as_str().to_string(),
            notes: stamp.notes.clone(),
            date: stamp.date.clone(),
            time: stamp.time.clone(),
            work_order_id: None,
            work_order_issued_date: None,
            agreement_id: None,
            agreement_value: None,
            agreement_issued_date: None,
        };
        match &fields {
            StepFields::General(_) => {}
            StepFields::WorkOrder(f) => {
                submission.work_order_id = Some(f.work_order_id.clone());
                submission.work_order_issued_date = Some(f.work_order_issued_date.clone());
            }
            StepFields::Agreement(f) => {
                submission.agreement_id = Some(f.agreement_id.clone());
                submission.agreement_value = f.agreement_value;
                submission.agreement_issued_date = Some(f.agreement_issued_date.clone());
            }
        }

        let prepared = PreparedSubmission {
            index,
            key: step.key,
            parent_update: ParentRecordUpdate::from_fields(&fields),
            fields,
            stamp,
            submission,
        };

        debug!("Submitting step '{}' (#{})", prepared.key, index);
        self.phase = TrackerPhase::Submitting(index);
        Ok(prepared)
    }

    /// Применить результат сетевых вызовов
    ///
    /// Ошибка возвращает трекер в `AwaitingInput` на том же шаге без изменений.
    pub fn finish_submit(
        &mut self,
        prepared: &PreparedSubmission,
        result: Result<(), PersistError>,
    ) -> Result<SubmitOutcome, SubmitError> {
        let index = prepared.index;
        if self.phase != TrackerPhase::Submitting(index) {
            return Err(SubmitError::NoSubmissionInFlight(index));
        }

        if let Err(e) = result {
            warn!("Step '{}' was not saved: {}", prepared.key, e);
            self.phase = TrackerPhase::AwaitingInput(index);
            return Err(e.into());
        }

        let step = &mut self.steps[index];
        step.fields = prepared.fields.clone();
        step.stamp = prepared.stamp.clone();
        step.completed = true;

        if index + 1 < self.steps.len() {
            self.current = index + 1;
            self.phase = TrackerPhase::AwaitingInput(index + 1);
            info!("Step '{}' completed, moving to #{}", prepared.key, index + 1);
            Ok(SubmitOutcome::Advanced(index + 1))
        } else {
            self.phase = TrackerPhase::Complete;
            info!("Tender process completed");
            Ok(SubmitOutcome::ProcessComplete)
        }
    }
}

// ============================================================================
// Async driver
// ============================================================================

/// Загрузить состояние процесса; при ошибке — свежий список с первого шага
pub async fn load_state<S>(store: &S, tender_id: &TenderId) -> (ProcessState, Option<LoadError>)
where
    S: ProcessStore + ?Sized,
{
    match store.fetch_steps(tender_id).await {
        Ok(records) => {
            let state = ProcessState::from_saved(&records);
            info!(
                "Loaded tender process for {}: {} saved records, current step #{}",
                tender_id,
                records.len(),
                state.current_index()
            );
            (state, None)
        }
        Err(e) => {
            warn!("Failed to load tender process for {}: {}", tender_id, e);
            (ProcessState::fresh(), Some(LoadError(e)))
        }
    }
}

/// Сохранить шаг и, для наряда и договора, продублировать данные в карточку тендера
pub async fn persist_submission<S, P>(
    store: &S,
    parent: &P,
    tender_id: &TenderId,
    prepared: &PreparedSubmission,
    artifact: Option<S::Artifact>,
) -> Result<(), PersistError>
where
    S: ProcessStore + ?Sized,
    P: ParentRecordStore + ?Sized,
{
    store
        .save_step(&prepared.submission, artifact)
        .await
        .map_err(PersistError::Step)?;

    if let Some(update) = &prepared.parent_update {
        parent
            .update_parent(tender_id, update)
            .await
            .map_err(PersistError::Parent)?;
    }
    Ok(())
}

/// Трекер, владеющий хранилищами и состоянием одного процесса
pub struct StepTracker<S, P> {
    store: S,
    parent: P,
    tender_id: TenderId,
    state: ProcessState,
}

impl<S, P> StepTracker<S, P>
where
    S: ProcessStore,
    P: ParentRecordStore,
{
    /// Загрузить процесс тендера; ошибка загрузки не мешает начать заново
    pub async fn initialize(store: S, parent: P, tender_id: TenderId) -> (Self, Option<LoadError>) {
        let (state, error) = load_state(&store, &tender_id).await;
        let tracker = Self {
            store,
            parent,
            tender_id,
            state,
        };
        (tracker, error)
    }

    /// Перечитать процесс из хранилища
    pub async fn reload(&mut self) -> Option<LoadError> {
        self.state.begin_reload();
        let (state, error) = load_state(&self.store, &self.tender_id).await;
        self.state = state;
        error
    }

    pub fn tender_id(&self) -> &TenderId {
        &self.tender_id
    }

    pub fn state(&self) -> &ProcessState {
        &self.state
    }

    pub fn current_step(&self) -> CurrentStep<'_> {
        self.state.current_step()
    }

    pub async fn submit_current_step(
        &mut self,
        form: &StepForm,
        artifact: Option<S::Artifact>,
    ) -> Result<SubmitOutcome, SubmitError> {
        let now = chrono::Local::now().naive_local();
        self.submit_current_step_at(form, artifact, now).await
    }

    /// Отправить текущий шаг; `now` подставляется в пустые дату и время
    pub async fn submit_current_step_at(
        &mut self,
        form: &StepForm,
        artifact: Option<S::Artifact>,
        now: NaiveDateTime,
    ) -> Result<SubmitOutcome, SubmitError> {
        let prepared = self.state.begin_submit(&self.tender_id, form, now)?;
        let result =
            persist_submission(&self.store, &self.parent, &self.tender_id, &prepared, artifact)
                .await;
        self.state.finish_submit(&prepared, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_tender_process::aggregate::GeneralFields;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct FakeProcessStore {
        saved: Vec<SavedStepRecord>,
        fail_fetch: bool,
        fail_step: Cell<bool>,
        fail_parent: Cell<bool>,
        step_calls: RefCell<Vec<(StepSubmission, Option<String>)>>,
        parent_calls: RefCell<Vec<(String, ParentRecordUpdate)>>,
    }

    impl FakeProcessStore {
        fn with_saved(saved: Vec<SavedStepRecord>) -> Rc<Self> {
            Rc::new(Self {
                saved,
                ..Default::default()
            })
        }
    }

    #[async_trait(?Send)]
    impl ProcessStore for Rc<FakeProcessStore> {
        type Artifact = String;

        async fn fetch_steps(&self, _tender_id: &TenderId) -> Result<Vec<SavedStepRecord>, StoreError> {
            if self.fail_fetch {
                return Err(StoreError::Network("connection refused".into()));
            }
            Ok(self.saved.clone())
        }

        async fn save_step(
            &self,
            submission: &StepSubmission,
            artifact: Option<String>,
        ) -> Result<(), StoreError> {
            if self.fail_step.get() {
                return Err(StoreError::Http { status: 502 });
            }
            self.step_calls
                .borrow_mut()
                .push((submission.clone(), artifact));
            Ok(())
        }
    }

    #[async_trait(?Send)]
    impl ParentRecordStore for Rc<FakeProcessStore> {
        async fn update_parent(
            &self,
            tender_id: &TenderId,
            update: &ParentRecordUpdate,
        ) -> Result<(), StoreError> {
            if self.fail_parent.get() {
                return Err(StoreError::Http { status: 500 });
            }
            self.parent_calls
                .borrow_mut()
                .push((tender_id.value().to_string(), update.clone()));
            Ok(())
        }
    }

    type FakeTracker = StepTracker<Rc<FakeProcessStore>, Rc<FakeProcessStore>>;

    fn tender() -> TenderId {
        TenderId::new("T-100").unwrap()
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(10, 15, 0)
            .unwrap()
    }

    fn completed(key: StepKey) -> SavedStepRecord {
        SavedStepRecord {
            key: key.as_str().to_string(),
            notes: Some("done".into()),
            date: Some("2024-01-01".into()),
            time: Some("09:00".into()),
            completed: true,
            ..Default::default()
        }
    }

    async fn tracker_with(saved: Vec<SavedStepRecord>) -> (FakeTracker, Rc<FakeProcessStore>) {
        let fake = FakeProcessStore::with_saved(saved);
        let (tracker, error) = StepTracker::initialize(fake.clone(), fake.clone(), tender()).await;
        assert_eq!(error, None);
        (tracker, fake)
    }

    fn general(notes: &str, date: &str, time: &str) -> StepForm {
        StepForm::General {
            notes: notes.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    fn assert_single_current(state: &ProcessState) {
        let current = state.current_index();
        for (i, step) in state.steps().iter().enumerate() {
            if i < current {
                assert!(step.completed, "step {} before current must be completed", i);
            } else if i > current {
                assert!(!step.completed, "step {} after current must be incomplete", i);
            }
        }
    }

    #[tokio::test]
    async fn test_fresh_process_starts_at_first_step() {
        let (mut tracker, fake) = tracker_with(vec![]).await;
        assert_eq!(tracker.state().steps().len(), 8);
        assert_eq!(tracker.state().phase(), TrackerPhase::AwaitingInput(0));
        assert!(tracker.state().steps().iter().all(|s| !s.completed));

        let outcome = tracker
            .submit_current_step_at(&general("ok", "2024-01-01", "09:00"), None, now())
            .await
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Advanced(1));
        assert_eq!(tracker.state().current_index(), 1);
        let first = &tracker.state().steps()[0];
        assert!(first.completed);
        assert_eq!(
            first.fields,
            StepFields::General(GeneralFields {
                notes: "ok".into(),
                date: "2024-01-01".into(),
                time: "09:00".into(),
            })
        );
        assert_single_current(tracker.state());

        let calls = fake.step_calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.step_key, "site_investigation");
        assert_eq!(calls[0].0.tender_id, "T-100");
        assert!(fake.parent_calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_agreement_completes_process() {
        let saved: Vec<_> = TENDER_PROCESS_STEPS[..7]
            .iter()
            .map(|d| completed(d.key))
            .collect();
        let (mut tracker, fake) = tracker_with(saved).await;
        assert_eq!(tracker.state().current_index(), 7);
        assert_eq!(tracker.current_step().schema, StepSchema::Agreement);

        let form = StepForm::Agreement {
            agreement_id: "AG-1".into(),
            agreement_value: "100000".into(),
            agreement_issued_date: "2024-03-01".into(),
        };
        let outcome = tracker
            .submit_current_step_at(&form, None, now())
            .await
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::ProcessComplete);
        assert!(tracker.state().is_complete());
        assert!(tracker.state().steps()[7].completed);
        assert_eq!(tracker.state().current_index(), 7);

        let steps = fake.step_calls.borrow();
        let submission = &steps[0].0;
        assert_eq!(submission.notes, "passed");
        assert_eq!(submission.date, "2024-06-01");
        assert_eq!(submission.time, "10:15");
        assert_eq!(submission.agreement_value, Some(100000.0));

        let parents = fake.parent_calls.borrow();
        assert_eq!(parents.len(), 1);
        assert_eq!(parents[0].0, "T-100");
        assert!(matches!(parents[0].1, ParentRecordUpdate::Agreement(_)));
    }

    #[tokio::test]
    async fn test_work_order_with_empty_id_is_rejected() {
        let saved: Vec<_> = TENDER_PROCESS_STEPS[..6]
            .iter()
            .map(|d| completed(d.key))
            .collect();
        let (mut tracker, fake) = tracker_with(saved).await;
        assert_eq!(tracker.state().current_index(), 6);
        let before = tracker.state().clone();

        let form = StepForm::WorkOrder {
            work_order_id: "".into(),
            work_order_issued_date: "2024-02-01".into(),
        };
        let err = tracker
            .submit_current_step_at(&form, None, now())
            .await
            .unwrap_err();

        match err {
            SubmitError::Validation(errors) => {
                assert!(errors.get(field::WORK_ORDER_ID).is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(tracker.state(), &before);
        assert!(fake.step_calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_work_order_writes_through_to_tender() {
        let saved: Vec<_> = TENDER_PROCESS_STEPS[..6]
            .iter()
            .map(|d| completed(d.key))
            .collect();
        let (mut tracker, fake) = tracker_with(saved).await;

        let form = StepForm::WorkOrder {
            work_order_id: "WO-55".into(),
            work_order_issued_date: "2024-02-01".into(),
        };
        let outcome = tracker
            .submit_current_step_at(&form, Some("order.pdf".into()), now())
            .await
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::Advanced(7));
        let steps = fake.step_calls.borrow();
        assert_eq!(steps[0].1.as_deref(), Some("order.pdf"));
        assert_eq!(steps[0].0.work_order_id.as_deref(), Some("WO-55"));
        let parents = fake.parent_calls.borrow();
        match &parents[0].1 {
            ParentRecordUpdate::WorkOrder(f) => assert_eq!(f.work_order_id, "WO-55"),
            other => panic!("unexpected update {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_step_save_failure_leaves_state_unchanged() {
        let (mut tracker, fake) = tracker_with(vec![completed(StepKey::SiteInvestigation)]).await;
        let before = tracker.state().clone();
        fake.fail_step.set(true);

        let err = tracker
            .submit_current_step_at(&general("agenda", "", ""), None, now())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SubmitError::Persist(PersistError::Step(StoreError::Http { status: 502 }))
        );
        assert_eq!(tracker.state(), &before);

        fake.fail_step.set(false);
        let outcome = tracker
            .submit_current_step_at(&general("agenda", "", ""), None, now())
            .await
            .unwrap();
        assert_eq!(outcome, SubmitOutcome::Advanced(2));
    }

    #[tokio::test]
    async fn test_parent_update_failure_leaves_state_unchanged() {
        let saved: Vec<_> = TENDER_PROCESS_STEPS[..6]
            .iter()
            .map(|d| completed(d.key))
            .collect();
        let (mut tracker, fake) = tracker_with(saved).await;
        let before = tracker.state().clone();
        fake.fail_parent.set(true);

        let form = StepForm::WorkOrder {
            work_order_id: "WO-1".into(),
            work_order_issued_date: "2024-02-01".into(),
        };
        let err = tracker
            .submit_current_step_at(&form, None, now())
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Persist(PersistError::Parent(_))));
        assert_eq!(tracker.state(), &before);
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_fresh_state() {
        let fake = Rc::new(FakeProcessStore {
            fail_fetch: true,
            ..Default::default()
        });
        let (tracker, error) = StepTracker::initialize(fake.clone(), fake, tender()).await;
        assert!(matches!(error, Some(LoadError(StoreError::Network(_)))));
        assert_eq!(tracker.state(), &ProcessState::fresh());
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let saved = vec![
            completed(StepKey::SiteInvestigation),
            completed(StepKey::PreBidMeeting),
        ];
        let (mut tracker, _) = tracker_with(saved).await;
        let first = tracker.state().clone();
        assert_eq!(tracker.reload().await, None);
        assert_eq!(tracker.state(), &first);
        assert_eq!(first.current_index(), 2);
    }

    #[test]
    fn test_saved_gap_is_normalised() {
        let saved = vec![
            completed(StepKey::SiteInvestigation),
            completed(StepKey::BidSubmission),
            SavedStepRecord {
                key: "site_visit".into(),
                completed: true,
                ..Default::default()
            },
        ];
        let state = ProcessState::from_saved(&saved);
        assert_eq!(state.current_index(), 1);
        assert!(!state.steps()[2].completed);
        assert_single_current(&state);
    }

    #[test]
    fn test_all_completed_is_terminal() {
        let saved: Vec<_> = TENDER_PROCESS_STEPS.iter().map(|d| completed(d.key)).collect();
        let mut state = ProcessState::from_saved(&saved);
        assert!(state.is_complete());
        assert_eq!(state.current_index(), 7);

        let err = state
            .begin_submit(&tender(), &general("x", "", ""), now())
            .unwrap_err();
        assert_eq!(err, SubmitError::NotAwaitingInput(TrackerPhase::Complete));
    }

    #[test]
    fn test_single_submission_in_flight() {
        let mut state = ProcessState::fresh();
        let prepared = state
            .begin_submit(&tender(), &general("a", "", ""), now())
            .unwrap();
        assert!(state.is_submitting());

        let err = state
            .begin_submit(&tender(), &general("b", "", ""), now())
            .unwrap_err();
        assert_eq!(err, SubmitError::NotAwaitingInput(TrackerPhase::Submitting(0)));

        assert_eq!(state.finish_submit(&prepared, Ok(())), Ok(SubmitOutcome::Advanced(1)));
        assert_eq!(
            state.finish_submit(&prepared, Ok(())),
            Err(SubmitError::NoSubmissionInFlight(0))
        );
    }

    #[test]
    fn test_reload_waits_for_submission_in_flight() {
        let mut state = ProcessState::fresh();
        let prepared = state
            .begin_submit(&tender(), &general("a", "", ""), now())
            .unwrap();

        assert!(!state.begin_reload());
        assert_eq!(state.phase(), TrackerPhase::Submitting(0));

        assert_eq!(state.finish_submit(&prepared, Ok(())), Ok(SubmitOutcome::Advanced(1)));
        assert!(state.steps()[0].completed);

        assert!(state.begin_reload());
        assert_eq!(state, ProcessState::loading());
    }

    #[tokio::test]
    async fn test_walk_through_all_steps() {
        let (mut tracker, fake) = tracker_with(vec![]).await;

        for (index, def) in TENDER_PROCESS_STEPS.iter().enumerate() {
            assert_eq!(tracker.state().phase(), TrackerPhase::AwaitingInput(index));
            assert_eq!(tracker.current_step().step.key, def.key);
            assert_single_current(tracker.state());

            let form = match tracker.current_step().schema {
                StepSchema::General => general("done", "", ""),
                StepSchema::WorkOrder => StepForm::WorkOrder {
                    work_order_id: "WO-7".into(),
                    work_order_issued_date: "2024-02-01".into(),
                },
                StepSchema::Agreement => StepForm::Agreement {
                    agreement_id: "AG-7".into(),
                    agreement_value: "2500.5".into(),
                    agreement_issued_date: "2024-03-01".into(),
                },
            };
            let outcome = tracker
                .submit_current_step_at(&form, None, now())
                .await
                .unwrap();

            if index + 1 < TENDER_PROCESS_STEPS.len() {
                assert_eq!(outcome, SubmitOutcome::Advanced(index + 1));
            } else {
                assert_eq!(outcome, SubmitOutcome::ProcessComplete);
            }
            assert_single_current(tracker.state());
            assert!(tracker.state().steps()[..=index].iter().all(|s| s.completed));
        }

        assert!(tracker.state().is_complete());
        let keys: Vec<_> = fake
            .step_calls
            .borrow()
            .iter()
            .map(|(s, _)| s.step_key.clone())
            .collect();
        let expected: Vec<_> = TENDER_PROCESS_STEPS
            .iter()
            .map(|d| d.key.as_str().to_string())
            .collect();
        assert_eq!(keys, expected);
        assert_eq!(fake.parent_calls.borrow().len(), 2);
    }

    #[test]
    fn test_form_of_wrong_variant_is_rejected() {
        let mut state = ProcessState::fresh();
        let before = state.clone();
        let err = state
            .begin_submit(&tender(), &StepForm::empty(StepSchema::Agreement), now())
            .unwrap_err();
        match err {
            SubmitError::Validation(errors) => assert!(errors.get(field::FORM).is_some()),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert_eq!(state, before);
    }
}
