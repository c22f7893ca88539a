use crate::domain::a001_tender_process::api::HttpProcessApi;
use contracts::domain::a001_tender_process::{
    load_state, persist_submission, ProcessState, StepForm, SubmitError, SubmitOutcome, TenderId,
    TrackerPhase, ValidationErrors,
};
use leptos::prelude::*;
use web_sys::File;

/// ViewModel пошагового процесса тендера
///
/// Держит чистую машину состояний в сигнале; сетевые вызовы идут между
/// `begin_submit` и `finish_submit`.
#[derive(Clone)]
pub struct TenderProcessViewModel {
    pub tender_id: TenderId,
    pub state: RwSignal<ProcessState>,
    pub form: RwSignal<StepForm>,
    pub field_errors: RwSignal<ValidationErrors>,
    pub error: RwSignal<Option<String>>,
    /// Имя выбранного файла, для отображения
    pub artifact_name: RwSignal<Option<String>>,
    artifact: StoredValue<Option<File>, LocalStorage>,
    api: HttpProcessApi,
}

impl TenderProcessViewModel {
    pub fn new(tender_id: TenderId) -> Self {
        let state = ProcessState::loading();
        let form = StepForm::empty(state.current_step().schema);
        Self {
            tender_id,
            state: RwSignal::new(state),
            form: RwSignal::new(form),
            field_errors: RwSignal::new(ValidationErrors::default()),
            error: RwSignal::new(None),
            artifact_name: RwSignal::new(None),
            artifact: StoredValue::new_local(None),
            api: HttpProcessApi,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.phase() == TrackerPhase::Loading)
    }

    pub fn is_submitting(&self) -> bool {
        self.state.with(|s| s.is_submitting())
    }

    /// Загрузить процесс тендера; при ошибке начинаем с первого шага
    pub fn load(&self) {
        if self.state.try_update(|s| s.begin_reload()) != Some(true) {
            return;
        }
        self.error.set(None);

        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let (state, error) = load_state(&vm.api, &vm.tender_id).await;
            vm.state.set(state);
            vm.reset_form();
            if let Some(e) = error {
                vm.error.set(Some(e.to_string()));
            }
        });
    }

    pub fn set_field(&self, name: &'static str, value: String) {
        self.form.update(|f| f.set(name, value));
        if self.field_errors.with_untracked(|e| e.get(name).is_some()) {
            self.field_errors.update(|e| e.0.retain(|fe| fe.field != name));
        }
    }

    pub fn field_error(&self, name: &str) -> Option<String> {
        self.field_errors.with(|e| e.get(name).map(str::to_string))
    }

    pub fn set_artifact(&self, file: Option<File>) {
        self.artifact_name.set(file.as_ref().map(|f| f.name()));
        self.artifact.set_value(file);
    }

    /// Отправить текущий шаг
    pub fn submit(&self) {
        let now = chrono::Local::now().naive_local();
        let form = self.form.get_untracked();
        let tender_id = self.tender_id.clone();

        let Some(begun) = self
            .state
            .try_update(|s| s.begin_submit(&tender_id, &form, now))
        else {
            return;
        };

        let prepared = match begun {
            Ok(prepared) => prepared,
            Err(SubmitError::Validation(errors)) => {
                log::debug!("Step form rejected: {}", errors);
                self.field_errors.set(errors);
                return;
            }
            Err(e) => {
                self.error.set(Some(e.to_string()));
                return;
            }
        };

        self.field_errors.set(ValidationErrors::default());
        self.error.set(None);
        let artifact = self.artifact.get_value();

        let vm = self.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result =
                persist_submission(&vm.api, &vm.api, &vm.tender_id, &prepared, artifact).await;
            match vm.state.try_update(|s| s.finish_submit(&prepared, result)) {
                Some(Ok(SubmitOutcome::Advanced(_))) => vm.reset_form(),
                Some(Ok(SubmitOutcome::ProcessComplete)) => vm.set_artifact(None),
                Some(Err(e)) => {
                    let msg = e.to_string();
                    vm.error.set(Some(msg.clone()));
                    if let Some(w) = web_sys::window() {
                        let _ = w.alert_with_message(&msg);
                    }
                }
                None => {}
            }
        });
    }

    /// Форма для текущего шага, предзаполненная сохранёнными значениями
    fn reset_form(&self) {
        let form = self
            .state
            .with_untracked(|s| StepForm::from_fields(&s.current_step().step.fields));
        self.form.set(form);
        self.field_errors.set(ValidationErrors::default());
        self.set_artifact(None);
    }
}
