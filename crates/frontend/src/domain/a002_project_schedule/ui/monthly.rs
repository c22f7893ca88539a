use super::progress_table::ProgressTable;
use crate::domain::a002_project_schedule::api::fetch_daily_schedule;
use crate::shared::components::month_selector::MonthSelector;
use chrono::{Datelike, Local};
use contracts::domain::a001_tender_process::TenderId;
use contracts::domain::a002_project_schedule::{
    month_name, monthly_rows, ScheduleItem, MONTHLY_LAG_THRESHOLD,
};
use leptos::prelude::*;
use thaw::*;

/// Помесячный обзор графика работ
#[component]
pub fn MonthlySchedule(tender_id: TenderId) -> impl IntoView {
    let today = Local::now();
    let month = RwSignal::new(today.month());
    let year = RwSignal::new(today.year());

    let items = RwSignal::new(Vec::<ScheduleItem>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    wasm_bindgen_futures::spawn_local(async move {
        match fetch_daily_schedule(&tender_id).await {
            Ok(data) => {
                log::info!("Loaded {} monthly schedule items", data.len());
                items.set(data);
            }
            Err(e) => {
                log::error!("Error fetching monthly data: {}", e);
                error.set(Some(e));
            }
        }
        loading.set(false);
    });

    let rows = Signal::derive(move || items.with(|i| monthly_rows(i, year.get(), month.get())));
    let period_label =
        Signal::derive(move || month_name(month.get()).unwrap_or_default().to_string());

    view! {
        <div class="schedule-view">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 16px;">
                <div>
                    <h3>"Monthly Overview"</h3>
                    <div class="page-header__subtitle">
                        {move || format!("Project progress for {} {}", period_label.get(), year.get())}
                    </div>
                </div>
                <MonthSelector month=month year=year />
            </Flex>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            {move || {
                if loading.get() {
                    view! {
                        <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                            <Spinner />
                        </Flex>
                    }
                    .into_any()
                } else {
                    view! {
                        <ProgressTable
                            rows=rows
                            period_label=period_label
                            lag_threshold=MONTHLY_LAG_THRESHOLD
                            show_status=true
                        />
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
