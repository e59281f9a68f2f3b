use crate::config::AppConfig;
use crate::layout::global_context::{use_app_context, AppGlobalContext};
use crate::layout::Shell;
use crate::shared::toast::{ToastHost, ToastService};
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
fn MainLayout() -> impl IntoView {
    let tabs_store = use_app_context();
    // Restores the tab named in `?active=` and keeps the URL in sync.
    tabs_store.init_router_integration();

    view! { <Shell /> }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppConfig::load());
    provide_context(ToastService::new());
    provide_context(AppGlobalContext::new());

    view! {
        <ConfigProvider>
            <MainLayout />
            <ToastHost />
        </ConfigProvider>
    }
}
