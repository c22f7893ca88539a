use contracts::domain::a001_tender_process::TenderId;
use leptos::prelude::Effect;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

/// Вкладки панели тендера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Process,
    Weekly,
    Monthly,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 3] = [
        DashboardTab::Process,
        DashboardTab::Weekly,
        DashboardTab::Monthly,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            DashboardTab::Process => "process",
            DashboardTab::Weekly => "weekly",
            DashboardTab::Monthly => "monthly",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::Process => "Tender Process",
            DashboardTab::Weekly => "Weekly Schedule",
            DashboardTab::Monthly => "Monthly Schedule",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

/// Параметры строки запроса: `?tender=<id>&active=<tab>`
#[derive(Debug, Default, Serialize, Deserialize)]
struct LocationQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active: Option<String>,
}

/// Разобрать строку запроса; неизвестная вкладка = вкладка процесса
pub fn parse_query(search: &str) -> (Option<TenderId>, DashboardTab) {
    let query: LocationQuery =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    let tender_id = query.tender.and_then(|t| TenderId::new(t).ok());
    let tab = query
        .active
        .as_deref()
        .and_then(DashboardTab::from_key)
        .unwrap_or_default();
    (tender_id, tab)
}

pub fn build_query(tender_id: Option<&TenderId>, tab: DashboardTab) -> String {
    let query = LocationQuery {
        tender: tender_id.map(|t| t.value().to_string()),
        active: Some(tab.key().to_string()),
    };
    format!("?{}", serde_qs::to_string(&query).unwrap_or_default())
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub tender_id: RwSignal<Option<TenderId>>,
    pub active: RwSignal<DashboardTab>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            tender_id: RwSignal::new(None),
            active: RwSignal::new(DashboardTab::default()),
        }
    }

    pub fn from_location() -> Self {
        let ctx = Self::new();
        ctx.init_from_location();
        ctx
    }

    /// Прочитать тендер и вкладку из URL и синхронизировать вкладку обратно в URL
    pub fn init_from_location(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let (tender_id, tab) = parse_query(&search);
        match &tender_id {
            Some(id) => log::info!("Opening dashboard for tender {}", id),
            None => log::warn!("No tender id in the query string"),
        }
        self.tender_id.set(tender_id);
        self.active.set(tab);

        let this = *self;
        Effect::new(move |_| {
            let tab = this.active.get();
            let new_url = this
                .tender_id
                .with_untracked(|id| build_query(id.as_ref(), tab));

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn activate_tab(&self, tab: DashboardTab) {
        log::debug!("activate_tab: {}", tab.key());
        self.active.set(tab);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}
