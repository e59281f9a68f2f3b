use crate::layout::global_context::{use_app_context, Tab as TabData};
use crate::layout::tabs::TabPage;
use leptos::ev;
use leptos::prelude::*;

/// Tab strip plus the content of every open tab.
#[component]
pub fn Center() -> impl IntoView {
    let tabs_store = use_app_context();

    view! {
        <div data-zone="center" class="app-tabs">
            <div class="tabs__bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| (tab.key.clone(), tab.title.clone())
                    children=move |tab| view! { <TabHandle tab=tab /> }
                />
            </div>
            <Show
                when=move || tabs_store.opened.with(|t| !t.is_empty())
                fallback=|| view! {
                    <div class="tabs__empty">"Elige una opción del menú para empezar."</div>
                }
            >
                <div class="tabs__content">
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                    />
                </div>
            </Show>
        </div>
    }
}

#[component]
fn TabHandle(tab: TabData) -> impl IntoView {
    let tabs_store = use_app_context();

    let key_active = tab.key.clone();
    let is_active = Memo::new(move |_| {
        tabs_store.active.with(|a| a.as_deref() == Some(key_active.as_str()))
    });

    let key_click = tab.key.clone();
    let key_close = tab.key.clone();
    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key_close);
    };

    view! {
        <div
            class="tabs__handle"
            class:tabs__handle--active=is_active
            on:click=move |_| tabs_store.activate_tab(&key_click)
        >
            <span>{tab.title}</span>
            <button class="tabs__close" title="Cerrar" on:click=on_close>"×"</button>
        </div>
    }
}
