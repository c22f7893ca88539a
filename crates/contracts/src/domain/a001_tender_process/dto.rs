//! Wire DTOs of the tender process endpoints

use serde::{Deserialize, Serialize};

use super::aggregate::{
    AgreementFields, GeneralFields, ProcessStepDefinition, ProcessStepState, StepFields,
    StepSchema, StepStamp, WorkOrderFields,
};

/// Ответ `GET /api/tender/process/{tender_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessDataResponse {
    #[serde(rename = "processData", default)]
    pub process_data: Vec<SavedStepRecord>,
}

/// Сохранённая запись шага, как её отдаёт бэкенд
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SavedStepRecord {
    pub key: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(rename = "workOrder_id", default)]
    pub work_order_id: Option<String>,
    #[serde(rename = "workOrder_issued_date", default)]
    pub work_order_issued_date: Option<String>,
    #[serde(default)]
    pub agreement_id: Option<String>,
    #[serde(default)]
    pub agreement_value: Option<f64>,
    #[serde(default)]
    pub agreement_issued_date: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl SavedStepRecord {
    /// Наложить запись на определение шага
    pub fn merge_onto(&self, definition: &ProcessStepDefinition) -> ProcessStepState {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let stamp = StepStamp {
            notes: text(&self.notes),
            date: text(&self.date),
            time: text(&self.time),
        };
        let fields = match definition.key.schema() {
            StepSchema::General => StepFields::General(GeneralFields {
                notes: stamp.notes.clone(),
                date: stamp.date.clone(),
                time: stamp.time.clone(),
            }),
            StepSchema::WorkOrder => StepFields::WorkOrder(WorkOrderFields {
                work_order_id: text(&self.work_order_id),
                work_order_issued_date: text(&self.work_order_issued_date),
            }),
            StepSchema::Agreement => StepFields::Agreement(AgreementFields {
                agreement_id: text(&self.agreement_id),
                agreement_value: self.agreement_value,
                agreement_issued_date: text(&self.agreement_issued_date),
            }),
        };
        ProcessStepState {
            key: definition.key,
            label: definition.label,
            fields,
            stamp,
            completed: self.completed,
        }
    }
}

/// Тело `POST /api/tender/process/step`
///
/// Те же поля уходят multipart-формой, если к шагу приложен файл.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSubmission {
    pub tender_id: String,
    pub step_key: String,
    pub notes: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "workOrder_id", skip_serializing_if = "Option::is_none", default)]
    pub work_order_id: Option<String>,
    #[serde(
        rename = "workOrder_issued_date",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub work_order_issued_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub agreement_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub agreement_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub agreement_issued_date: Option<String>,
}

impl StepSubmission {
    /// Пары "имя поля — значение" для multipart-формы (без файла)
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("tender_id", self.tender_id.clone()),
            ("step_key", self.step_key.clone()),
            ("notes", self.notes.clone()),
            ("date", self.date.clone()),
            ("time", self.time.clone()),
        ];
        if let Some(v) = &self.work_order_id {
            fields.push(("workOrder_id", v.clone()));
        }
        if let Some(v) = &self.work_order_issued_date {
            fields.push(("workOrder_issued_date", v.clone()));
        }
        if let Some(v) = &self.agreement_id {
            fields.push(("agreement_id", v.clone()));
        }
        if let Some(v) = self.agreement_value {
            fields.push(("agreement_value", v.to_string()));
        }
        if let Some(v) = &self.agreement_issued_date {
            fields.push(("agreement_issued_date", v.clone()));
        }
        fields
    }
}

/// Денормализованная запись в карточку тендера
#[derive(Debug, Clone, PartialEq)]
pub enum ParentRecordUpdate {
    /// `PUT /api/tender/update-workorder/{tender_id}`
    WorkOrder(WorkOrderFields),
    /// `PUT /api/tender/update-agreement/{tender_id}`
    Agreement(AgreementFields),
}

impl ParentRecordUpdate {
    pub fn from_fields(fields: &StepFields) -> Option<Self> {
        match fields {
            StepFields::General(_) => None,
            StepFields::WorkOrder(f) => Some(ParentRecordUpdate::WorkOrder(f.clone())),
            StepFields::Agreement(f) => Some(ParentRecordUpdate::Agreement(f.clone())),
        }
    }

    /// Путь эндпоинта без префикса API
    pub fn path(&self, tender_id: &str) -> String {
        match self {
            ParentRecordUpdate::WorkOrder(_) => format!("/api/tender/update-workorder/{}", tender_id),
            ParentRecordUpdate::Agreement(_) => format!("/api/tender/update-agreement/{}", tender_id),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            ParentRecordUpdate::WorkOrder(f) => serde_json::to_value(f),
            ParentRecordUpdate::Agreement(f) => serde_json::to_value(f),
        }
    }
}
