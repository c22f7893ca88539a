//! Raw step input as typed by the user and its validation

use chrono::NaiveDateTime;

use super::aggregate::{
    AgreementFields, GeneralFields, StepFields, StepSchema, WorkOrderFields,
};
use crate::shared::validation::{ValidationRules, ValueFormat, DATE_FORMAT, TIME_FORMAT};

/// Имена полей формы; совпадают с именами полей на проводе
pub mod field {
    pub const FORM: &str = "form";
    pub const NOTES: &str = "notes";
    pub const DATE: &str = "date";
    pub const TIME: &str = "time";
    pub const WORK_ORDER_ID: &str = "workOrder_id";
    pub const WORK_ORDER_ISSUED_DATE: &str = "workOrder_issued_date";
    pub const AGREEMENT_ID: &str = "agreement_id";
    pub const AGREEMENT_VALUE: &str = "agreement_value";
    pub const AGREEMENT_ISSUED_DATE: &str = "agreement_issued_date";
}

const NOTES_RULES: ValidationRules = ValidationRules::required();
const OPTIONAL_DATE_RULES: ValidationRules = ValidationRules::none().with_format(ValueFormat::Date);
const OPTIONAL_TIME_RULES: ValidationRules = ValidationRules::none().with_format(ValueFormat::Time);
const ID_RULES: ValidationRules = ValidationRules::required();
const ISSUED_DATE_RULES: ValidationRules =
    ValidationRules::required().with_format(ValueFormat::Date);
const VALUE_RULES: ValidationRules = ValidationRules::required();

/// Ошибка одного поля формы
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Все ошибки валидации формы шага
#[derive(Debug, Clone, PartialEq, Eq, Default, thiserror::Error)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Сообщение для конкретного поля
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn summary(&self) -> String {
        summarize(&self.0)
    }

    fn check(&mut self, field: &'static str, result: Result<(), String>) {
        if let Err(message) = result {
            self.0.push(FieldError { field, message });
        }
    }
}

/// Введённые пользователем значения, по варианту на схему шага
#[derive(Debug, Clone, PartialEq)]
pub enum StepForm {
    General {
        notes: String,
        date: String,
        time: String,
    },
    WorkOrder {
        work_order_id: String,
        work_order_issued_date: String,
    },
    Agreement {
        agreement_id: String,
        agreement_value: String,
        agreement_issued_date: String,
    },
}

impl StepForm {
    /// Пустая форма для схемы
    pub fn empty(schema: StepSchema) -> Self {
        match schema {
            StepSchema::General => StepForm::General {
                notes: String::new(),
                date: String::new(),
                time: String::new(),
            },
            StepSchema::WorkOrder => StepForm::WorkOrder {
                work_order_id: String::new(),
                work_order_issued_date: String::new(),
            },
            StepSchema::Agreement => StepForm::Agreement {
                agreement_id: String::new(),
                agreement_value: String::new(),
                agreement_issued_date: String::new(),
            },
        }
    }

    /// Предзаполнить форму сохранёнными значениями шага
    pub fn from_fields(fields: &StepFields) -> Self {
        match fields {
            StepFields::General(f) => StepForm::General {
                notes: f.notes.clone(),
                date: f.date.clone(),
                time: f.time.clone(),
            },
            StepFields::WorkOrder(f) => StepForm::WorkOrder {
                work_order_id: f.work_order_id.clone(),
                work_order_issued_date: f.work_order_issued_date.clone(),
            },
            StepFields::Agreement(f) => StepForm::Agreement {
                agreement_id: f.agreement_id.clone(),
                agreement_value: f.agreement_value.map(|v| v.to_string()).unwrap_or_default(),
                agreement_issued_date: f.agreement_issued_date.clone(),
            },
        }
    }

    pub fn schema(&self) -> StepSchema {
        match self {
            StepForm::General { .. } => StepSchema::General,
            StepForm::WorkOrder { .. } => StepSchema::WorkOrder,
            StepForm::Agreement { .. } => StepSchema::Agreement,
        }
    }

    /// Текущее значение поля по его имени (для привязки к input)
    pub fn value(&self, name: &str) -> String {
        let v = match (self, name) {
            (StepForm::General { notes, .. }, field::NOTES) => notes,
            (StepForm::General { date, .. }, field::DATE) => date,
            (StepForm::General { time, .. }, field::TIME) => time,
            (StepForm::WorkOrder { work_order_id, .. }, field::WORK_ORDER_ID) => work_order_id,
            (StepForm::WorkOrder { work_order_issued_date, .. }, field::WORK_ORDER_ISSUED_DATE) => {
                work_order_issued_date
            }
            (StepForm::Agreement { agreement_id, .. }, field::AGREEMENT_ID) => agreement_id,
            (StepForm::Agreement { agreement_value, .. }, field::AGREEMENT_VALUE) => agreement_value,
            (StepForm::Agreement { agreement_issued_date, .. }, field::AGREEMENT_ISSUED_DATE) => {
                agreement_issued_date
            }
            _ => return String::new(),
        };
        v.clone()
    }

    /// Записать значение поля по имени; поля другого варианта игнорируются
    pub fn set(&mut self, name: &str, value: String) {
        let slot = match (self, name) {
            (StepForm::General { notes, .. }, field::NOTES) => notes,
            (StepForm::General { date, .. }, field::DATE) => date,
            (StepForm::General { time, .. }, field::TIME) => time,
            (StepForm::WorkOrder { work_order_id, .. }, field::WORK_ORDER_ID) => work_order_id,
            (StepForm::WorkOrder { work_order_issued_date, .. }, field::WORK_ORDER_ISSUED_DATE) => {
                work_order_issued_date
            }
            (StepForm::Agreement { agreement_id, .. }, field::AGREEMENT_ID) => agreement_id,
            (StepForm::Agreement { agreement_value, .. }, field::AGREEMENT_VALUE) => agreement_value,
            (StepForm::Agreement { agreement_issued_date, .. }, field::AGREEMENT_ISSUED_DATE) => {
                agreement_issued_date
            }
            _ => return,
        };
        *slot = value;
    }

    /// Проверить форму и получить типизированные поля шага
    ///
    /// Пустые дата и время общего шага заполняются моментом `now`.
    pub fn validate(&self, now: NaiveDateTime) -> Result<StepFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let fields = match self {
            StepForm::General { notes, date, time } => {
                errors.check(field::NOTES, NOTES_RULES.validate_string(notes, "Notes"));
                errors.check(field::DATE, OPTIONAL_DATE_RULES.validate_string(date, "Date"));
                errors.check(field::TIME, OPTIONAL_TIME_RULES.validate_string(time, "Time"));
                StepFields::General(GeneralFields {
                    notes: notes.trim().to_string(),
                    date: or_now(date, now, DATE_FORMAT),
                    time: or_now(time, now, TIME_FORMAT),
                })
            }
            StepForm::WorkOrder {
                work_order_id,
                work_order_issued_date,
            } => {
                errors.check(
                    field::WORK_ORDER_ID,
                    ID_RULES.validate_string(work_order_id, "Work Order ID"),
                );
                errors.check(
                    field::WORK_ORDER_ISSUED_DATE,
                    ISSUED_DATE_RULES.validate_string(work_order_issued_date, "Work Order Issued Date"),
                );
                StepFields::WorkOrder(WorkOrderFields {
                    work_order_id: work_order_id.trim().to_string(),
                    work_order_issued_date: work_order_issued_date.trim().to_string(),
                })
            }
            StepForm::Agreement {
                agreement_id,
                agreement_value,
                agreement_issued_date,
            } => {
                errors.check(
                    field::AGREEMENT_ID,
                    ID_RULES.validate_string(agreement_id, "Agreement ID"),
                );
                let value = match VALUE_RULES.parse_number(agreement_value, "Agreement Value") {
                    Ok(v) => v,
                    Err(message) => {
                        errors.check(field::AGREEMENT_VALUE, Err(message));
                        None
                    }
                };
                errors.check(
                    field::AGREEMENT_ISSUED_DATE,
                    ISSUED_DATE_RULES.validate_string(agreement_issued_date, "Agreement Issued Date"),
                );
                StepFields::Agreement(AgreementFields {
                    agreement_id: agreement_id.trim().to_string(),
                    agreement_value: value,
                    agreement_issued_date: agreement_issued_date.trim().to_string(),
                })
            }
        };

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(errors)
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

fn or_now(raw: &str, now: NaiveDateTime, format: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        now.format(format).to_string()
    } else {
        trimmed.to_string()
    }
}
