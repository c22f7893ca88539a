pub mod global_context;
pub mod tab_bar;

use crate::shared::components::page_header::PageHeader;
use global_context::AppGlobalContext;
use leptos::prelude::*;
use tab_bar::TabBar;

/// Каркас панели тендера
///
/// ```text
/// +------------------------------------------+
/// |  PageHeader (tender id)                  |
/// +------------------------------------------+
/// |  TabBar                                  |
/// +------------------------------------------+
/// |  center                                  |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell<C>(center: C) -> impl IntoView
where
    C: Fn() -> AnyView + 'static + Send,
{
    let ctx = expect_context::<AppGlobalContext>();
    let subtitle = Signal::derive(move || {
        ctx.tender_id
            .get()
            .map(|id| format!("Tender {}", id))
    });

    view! {
        <div class="app-layout">
            <PageHeader title="Tender Dashboard" subtitle=subtitle icon_name="steps">
                {()}
            </PageHeader>
            <TabBar />
            <div data-zone="center" class="app-main" style="flex: 1; overflow: auto;">
                {move || center()}
            </div>
        </div>
    }
}
