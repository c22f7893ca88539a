use crate::shared::components::table::{format_lag, format_quantity, format_total};
use crate::shared::date_utils::format_day_month;
use contracts::domain::a002_project_schedule::{ItemStatus, ProgressRow};
use leptos::prelude::*;
use thaw::*;

fn status_badge(status: ItemStatus) -> impl IntoView {
    let color = match status {
        ItemStatus::Completed => BadgeColor::Success,
        ItemStatus::InProgress => BadgeColor::Brand,
        ItemStatus::Pending => BadgeColor::Subtle,
    };
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>{status.label()}</Badge>
    }
}

/// Таблица план/факт по строкам графика за выбранный период
#[component]
pub fn ProgressTable(
    #[prop(into)] rows: Signal<Vec<ProgressRow>>,
    /// Подпись колонок периода, например "Week 2" или "March"
    #[prop(into)]
    period_label: Signal<String>,
    /// Отставание ниже порога показывается как "-"; без порога скрывается только ноль
    #[prop(optional)]
    lag_threshold: Option<f64>,
    #[prop(optional)] show_status: bool,
) -> impl IntoView {
    view! {
        <div class="table-container">
            <table class="data-table schedule-table">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"WBS"</th>
                        <th>"Description"</th>
                        <th>"Unit"</th>
                        <th class="text-right">"Qty"</th>
                        <th class="text-right">"Executed"</th>
                        <th class="text-right">"Balance"</th>
                        <th class="text-right">{move || format!("{} Planned", period_label.get())}</th>
                        <th class="text-right">{move || format!("{} Achieved", period_label.get())}</th>
                        <th class="text-right">"Lag"</th>
                        {show_status.then(|| view! { <th>"Status"</th> })}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        let rows = rows.get();
                        if rows.is_empty() {
                            let colspan = if show_status { "11" } else { "10" };
                            return view! {
                                <tr>
                                    <td colspan=colspan class="text-center">"No schedule items"</td>
                                </tr>
                            }
                            .into_any();
                        }
                        rows.into_iter()
                            .enumerate()
                            .map(|(index, row)| {
                                let row_class = if row.is_active { "row-active" } else { "row-idle" };
                                let lag_class = if row.is_lagging {
                                    "text-right lag lag--behind"
                                } else {
                                    "text-right lag"
                                };
                                let start = format_day_month(row.item.start_date.as_deref());
                                let end = format_day_month(row.item.effective_end_date());
                                let status = row.item.item_status();
                                view! {
                                    <tr class=row_class>
                                        <td class="text-center">{index + 1}</td>
                                        <td class="mono">{row.item.wbs_id.clone()}</td>
                                        <td>
                                            <div title=row.item.description.clone()>{row.item.description.clone()}</div>
                                            <div class="schedule-dates">{format!("{} → {}", start, end)}</div>
                                        </td>
                                        <td class="text-center">{row.item.unit.clone()}</td>
                                        <td class="text-right">{format_total(row.item.quantity)}</td>
                                        <td class="text-right">{format_quantity(row.item.executed_quantity)}</td>
                                        <td class="text-right">{format_total(row.item.balance_quantity)}</td>
                                        <td class="text-right">{format_quantity(row.planned)}</td>
                                        <td class="text-right">{format_quantity(row.achieved)}</td>
                                        <td class=lag_class>{format_lag(row.lag, lag_threshold)}</td>
                                        {show_status.then(|| view! { <td class="text-center">{status_badge(status)}</td> })}
                                    </tr>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
        </div>
    }
}
