pub mod sidebar;

use crate::layout::global_context::use_app_context;
use leptos::prelude::*;
pub use sidebar::Sidebar;

/// Left zone of the shell; collapses with the header toggle.
#[component]
pub fn Left() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <aside class="app-sidebar" class:app-sidebar--collapsed=move || !ctx.left_open.get()>
            <Show when=move || ctx.left_open.get()>
                <Sidebar />
            </Show>
        </aside>
    }
}
