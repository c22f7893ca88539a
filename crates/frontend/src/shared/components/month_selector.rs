use chrono::{Datelike, Local};
use contracts::domain::a002_project_schedule::{month_name, year_options};
use leptos::prelude::*;

/// Предыдущий месяц для (year, month)
fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// MonthSelector component: month and year selects with quick buttons
#[component]
pub fn MonthSelector(
    /// Выбранный месяц, 1..=12
    month: RwSignal<u32>,
    year: RwSignal<i32>,
) -> impl IntoView {
    let current_year = Local::now().year();

    let on_current_month = move |_| {
        let now = Local::now();
        year.set(now.year());
        month.set(now.month());
    };

    let on_previous_month = move |_| {
        let (y, m) = previous_month(year.get_untracked(), month.get_untracked());
        year.set(y);
        month.set(m);
    };

    let button_style = "width: 32px; height: 32px; border: 1px solid #ced4da; border-radius: 4px; font-size: 0.75rem; background: #fff; color: #495057; cursor: pointer; font-weight: 500; display: flex; align-items: center; justify-content: center; padding: 0;";
    let select_style = "padding: 6px 8px; border: 1px solid #ced4da; border-radius: 4px; font-size: 0.875rem;";

    view! {
        <div style="display: flex; align-items: center; gap: 4px;">
            <button on:click=on_previous_month style=button_style title="Previous month">
                "-1M"
            </button>
            <button on:click=on_current_month style=button_style title="Current month">
                "0M"
            </button>

            <select
                prop:value=move || month.get().to_string()
                on:change=move |ev| {
                    if let Ok(m) = event_target_value(&ev).parse::<u32>() {
                        month.set(m);
                    }
                }
                style=select_style
            >
                {(1..=12u32)
                    .map(|m| {
                        view! { <option value=m.to_string()>{month_name(m).unwrap_or_default()}</option> }
                    })
                    .collect_view()}
            </select>

            <select
                prop:value=move || year.get().to_string()
                on:change=move |ev| {
                    if let Ok(y) = event_target_value(&ev).parse::<i32>() {
                        year.set(y);
                    }
                }
                style=select_style
            >
                {year_options(current_year)
                    .into_iter()
                    .map(|y| view! { <option value=y.to_string()>{y}</option> })
                    .collect_view()}
            </select>
        </div>
    }
}
