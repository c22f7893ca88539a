use crate::domain::a001_tender_process::ui::stepper::TenderProcessStepper;
use crate::domain::a002_project_schedule::ui::monthly::MonthlySchedule;
use crate::domain::a002_project_schedule::ui::weekly::WeeklySchedule;
use crate::layout::global_context::{AppGlobalContext, DashboardTab};
use crate::layout::Shell;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    let ctx = expect_context::<AppGlobalContext>();

    view! {
        <Shell
            center=move || {
                let Some(tender_id) = ctx.tender_id.get() else {
                    return view! {
                        <div class="info-message">
                            "No tender selected. Open the dashboard with ?tender=<id>."
                        </div>
                    }
                    .into_any();
                };
                match ctx.active.get() {
                    DashboardTab::Process => {
                        view! { <TenderProcessStepper tender_id=tender_id /> }.into_any()
                    }
                    DashboardTab::Weekly => {
                        view! { <WeeklySchedule tender_id=tender_id /> }.into_any()
                    }
                    DashboardTab::Monthly => {
                        view! { <MonthlySchedule tender_id=tender_id /> }.into_any()
                    }
                }
            }
        />
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <MainLayout />
    }
}
