use crate::shared::icons::icon;
use leptos::prelude::*;

/// Заголовок страницы панели: иконка, название, подзаголовок и действия справа
#[component]
pub fn PageHeader(
    #[prop(into)]
    title: String,

    /// Например, идентификатор открытого тендера
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// Имя иконки из `shared::icons`
    #[prop(optional)]
    icon_name: Option<&'static str>,

    children: Children,
) -> impl IntoView {
    view! {
        <div class="page-header">
            <div class="page-header__content">
                {icon_name.map(|name| view! { <span class="page-header__icon">{icon(name)}</span> })}
                <div class="page-header__text">
                    <h1 class="page-header__title">{title}</h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page-header__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page-header__actions">
                {children()}
            </div>
        </div>
    }
}
