use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Tender id and active tab come from the query string of the page.
    provide_context(AppGlobalContext::from_location());

    view! {
        <AppRoutes />
    }
}
