use serde::{Deserialize, Serialize};

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор тендера, к которому привязан процесс
///
/// Выдаётся внешним бэкендом, пустая строка недопустима.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TenderId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("tender id must not be empty")]
pub struct InvalidTenderId;

impl TenderId {
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidTenderId> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(InvalidTenderId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TenderId {
    type Error = InvalidTenderId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TenderId::new(value)
    }
}

impl From<TenderId> for String {
    fn from(id: TenderId) -> Self {
        id.0
    }
}

// ============================================================================
// Step definitions
// ============================================================================

/// Ключ шага процесса тендера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKey {
    SiteInvestigation,
    PreBidMeeting,
    BidSubmission,
    TechnicalBidOpening,
    CommercialBidOpening,
    Negotiation,
    WorkOrder,
    Agreement,
}

impl StepKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKey::SiteInvestigation => "site_investigation",
            StepKey::PreBidMeeting => "pre_bid_meeting",
            StepKey::BidSubmission => "bid_submission",
            StepKey::TechnicalBidOpening => "technical_bid_opening",
            StepKey::CommercialBidOpening => "commercial_bid_opening",
            StepKey::Negotiation => "negotiation",
            StepKey::WorkOrder => "work_order",
            StepKey::Agreement => "agreement",
        }
    }

    /// Разобрать ключ из строки, пришедшей с бэкенда
    pub fn parse(s: &str) -> Option<Self> {
        TENDER_PROCESS_STEPS
            .iter()
            .map(|d| d.key)
            .find(|k| k.as_str() == s)
    }

    /// Вариант набора полей, который собирает этот шаг
    pub fn schema(&self) -> StepSchema {
        match self {
            StepKey::WorkOrder => StepSchema::WorkOrder,
            StepKey::Agreement => StepSchema::Agreement,
            _ => StepSchema::General,
        }
    }
}

impl std::fmt::Display for StepKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Статическое описание шага
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStepDefinition {
    pub key: StepKey,
    pub label: &'static str,
}

/// Шаги процесса тендера в порядке прохождения
pub const TENDER_PROCESS_STEPS: [ProcessStepDefinition; 8] = [
    ProcessStepDefinition { key: StepKey::SiteInvestigation, label: "Site Inspection" },
    ProcessStepDefinition { key: StepKey::PreBidMeeting, label: "Pre bid Meeting" },
    ProcessStepDefinition { key: StepKey::BidSubmission, label: "Bid Submit" },
    ProcessStepDefinition { key: StepKey::TechnicalBidOpening, label: "Technical Bid Opening" },
    ProcessStepDefinition { key: StepKey::CommercialBidOpening, label: "Commercial Bid Opening" },
    ProcessStepDefinition { key: StepKey::Negotiation, label: "Negotiations" },
    ProcessStepDefinition { key: StepKey::WorkOrder, label: "Work Order" },
    ProcessStepDefinition { key: StepKey::Agreement, label: "Agreement" },
];

// ============================================================================
// Field variants
// ============================================================================

/// Схема полей шага
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepSchema {
    /// notes / date / time
    General,
    WorkOrder,
    Agreement,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneralFields {
    pub notes: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkOrderFields {
    #[serde(rename = "workOrder_id")]
    pub work_order_id: String,
    #[serde(rename = "workOrder_issued_date")]
    pub work_order_issued_date: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AgreementFields {
    pub agreement_id: String,
    pub agreement_value: Option<f64>,
    pub agreement_issued_date: String,
}

/// Значения полей шага, по одному варианту на схему
#[derive(Debug, Clone, PartialEq)]
pub enum StepFields {
    General(GeneralFields),
    WorkOrder(WorkOrderFields),
    Agreement(AgreementFields),
}

impl StepFields {
    pub fn empty(schema: StepSchema) -> Self {
        match schema {
            StepSchema::General => StepFields::General(GeneralFields::default()),
            StepSchema::WorkOrder => StepFields::WorkOrder(WorkOrderFields::default()),
            StepSchema::Agreement => StepFields::Agreement(AgreementFields::default()),
        }
    }

    pub fn schema(&self) -> StepSchema {
        match self {
            StepFields::General(_) => StepSchema::General,
            StepFields::WorkOrder(_) => StepSchema::WorkOrder,
            StepFields::Agreement(_) => StepSchema::Agreement,
        }
    }
}

/// Общая "шапка" любой записи шага: заметка и момент прохождения
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StepStamp {
    pub notes: String,
    pub date: String,
    pub time: String,
}

// ============================================================================
// Runtime state
// ============================================================================

/// Состояние одного шага после слияния определения с сохранёнными данными
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessStepState {
    pub key: StepKey,
    pub label: &'static str,
    pub fields: StepFields,
    pub stamp: StepStamp,
    pub completed: bool,
}

impl ProcessStepState {
    /// Пустой незавершённый шаг
    pub fn new(definition: &ProcessStepDefinition) -> Self {
        Self {
            key: definition.key,
            label: definition.label,
            fields: StepFields::empty(definition.key.schema()),
            stamp: StepStamp::default(),
            completed: false,
        }
    }

    pub fn schema(&self) -> StepSchema {
        self.key.schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_step_keys_unique_and_ordered() {
        let keys: HashSet<_> = TENDER_PROCESS_STEPS.iter().map(|d| d.key).collect();
        assert_eq!(keys.len(), TENDER_PROCESS_STEPS.len());
        assert_eq!(TENDER_PROCESS_STEPS[0].key, StepKey::SiteInvestigation);
        assert_eq!(TENDER_PROCESS_STEPS[6].key, StepKey::WorkOrder);
        assert_eq!(TENDER_PROCESS_STEPS[7].key, StepKey::Agreement);
    }

    #[test]
    fn test_key_wire_form() {
        for def in TENDER_PROCESS_STEPS.iter() {
            assert_eq!(StepKey::parse(def.key.as_str()), Some(def.key));
            let json = serde_json::to_string(&def.key).unwrap();
            assert_eq!(json, format!("\"{}\"", def.key.as_str()));
        }
        assert_eq!(StepKey::parse("site_visit"), None);
    }

    #[test]
    fn test_schema_by_key() {
        assert_eq!(StepKey::WorkOrder.schema(), StepSchema::WorkOrder);
        assert_eq!(StepKey::Agreement.schema(), StepSchema::Agreement);
        assert_eq!(StepKey::Negotiation.schema(), StepSchema::General);
    }

    #[test]
    fn test_tender_id_rejects_blank() {
        assert_eq!(TenderId::new("  "), Err(InvalidTenderId));
        assert_eq!(TenderId::new(" T-42 ").unwrap().value(), "T-42");
    }

    #[test]
    fn test_tender_id_deserialize_checks_blank() {
        let id: TenderId = serde_json::from_str("\"T-7\"").unwrap();
        assert_eq!(id.value(), "T-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"T-7\"");
        assert!(serde_json::from_str::<TenderId>("\"   \"").is_err());
    }
}
