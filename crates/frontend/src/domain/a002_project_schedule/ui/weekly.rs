use super::progress_table::ProgressTable;
use crate::domain::a002_project_schedule::api::fetch_weekly_schedule;
use crate::shared::components::month_selector::MonthSelector;
use contracts::domain::a001_tender_process::TenderId;
use contracts::domain::a002_project_schedule::{weekly_rows, ScheduleItem, WeekOfMonth};
use chrono::{Datelike, Local};
use leptos::prelude::*;
use thaw::*;

/// Месяц или год сменились после первого запуска эффекта
fn period_changed(prev: Option<(u32, i32)>, period: (u32, i32)) -> bool {
    prev.is_some_and(|p| p != period)
}

/// План и факт по неделям выбранного месяца
#[component]
pub fn WeeklySchedule(tender_id: TenderId) -> impl IntoView {
    let today = Local::now();
    let month = RwSignal::new(today.month());
    let year = RwSignal::new(today.year());
    let week = RwSignal::new(WeekOfMonth::First);

    let items = RwSignal::new(Vec::<ScheduleItem>::new());
    let loading = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);

    wasm_bindgen_futures::spawn_local(async move {
        match fetch_weekly_schedule(&tender_id).await {
            Ok(data) => {
                log::info!("Loaded {} weekly schedule items", data.len());
                items.set(data);
            }
            Err(e) => {
                log::error!("Error fetching weekly data: {}", e);
                error.set(Some(e));
            }
        }
        loading.set(false);
    });

    // Смена месяца или года возвращает на первую неделю
    Effect::new(move |prev: Option<(u32, i32)>| {
        let period = (month.get(), year.get());
        if period_changed(prev, period) {
            week.set(WeekOfMonth::First);
        }
        period
    });

    let rows = Signal::derive(move || items.with(|i| weekly_rows(i, week.get())));
    let period_label = Signal::derive(move || week.get().label().to_string());

    view! {
        <div class="schedule-view">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center style="margin-bottom: 16px;">
                <div>
                    <h3>"Weekly Progress"</h3>
                    <div class="page-header__subtitle">"Track planned vs achieved progress per week"</div>
                </div>
                <MonthSelector month=month year=year />
            </Flex>

            <div class="week-tabs">
                {WeekOfMonth::ALL
                    .into_iter()
                    .map(|w| {
                        let is_active = Memo::new(move |_| week.get() == w);
                        view! {
                            <button
                                class="week-tab"
                                class:active=is_active
                                on:click=move |_| week.set(w)
                            >
                                <span>{w.label()}</span>
                                <span class="week-tab__range">
                                    {move || w.day_range(year.get(), month.get())}
                                </span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            {move || {
                if loading.get() {
                    view! {
                        <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                            <Spinner />
                            <span>"Loading weekly data..."</span>
                        </Flex>
                    }
                    .into_any()
                } else {
                    view! { <ProgressTable rows=rows period_label=period_label /> }.into_any()
                }
            }}
        </div>
    }
}
