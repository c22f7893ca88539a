use super::global_context::{AppGlobalContext, DashboardTab};
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
fn TabButton(tab: DashboardTab) -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();
    let is_active = Memo::new(move |_| ctx.active.get() == tab);
    let icon_name = match tab {
        DashboardTab::Process => "steps",
        DashboardTab::Weekly | DashboardTab::Monthly => "calendar",
    };

    view! {
        <div class="tab" class:active=is_active on:click=move |_| ctx.activate_tab(tab)>
            {icon(icon_name)}
            <span>{tab.title()}</span>
        </div>
    }
}

/// Переключатель вкладок панели
#[component]
pub fn TabBar() -> impl IntoView {
    view! {
        <div class="tabs">
            {DashboardTab::ALL
                .into_iter()
                .map(|tab| view! { <TabButton tab=tab /> })
                .collect_view()}
        </div>
    }
}
