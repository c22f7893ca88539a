//! Collaborators of the step tracker: process store and parent record

use async_trait::async_trait;
use thiserror::Error;

use super::aggregate::TenderId;
use super::dto::{ParentRecordUpdate, SavedStepRecord, StepSubmission};

/// Ошибки обращения к внешнему хранилищу
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {status}")]
    Http { status: u16 },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Failed to build request: {0}")]
    Encode(String),
}

/// Хранилище шагов процесса тендера
///
/// `Artifact` — непрозрачный дескриптор файла, приложенного к шагу;
/// трекер его не читает, а только передаёт в `save_step`.
#[async_trait(?Send)]
pub trait ProcessStore {
    type Artifact;

    /// Сохранённые записи шагов для тендера
    async fn fetch_steps(&self, tender_id: &TenderId) -> Result<Vec<SavedStepRecord>, StoreError>;

    /// Сохранить шаг; при наличии файла используется multipart-вызов
    async fn save_step(
        &self,
        submission: &StepSubmission,
        artifact: Option<Self::Artifact>,
    ) -> Result<(), StoreError>;
}

/// Карточка тендера, куда дублируются данные наряда и договора
#[async_trait(?Send)]
pub trait ParentRecordStore {
    async fn update_parent(
        &self,
        tender_id: &TenderId,
        update: &ParentRecordUpdate,
    ) -> Result<(), StoreError>;
}
