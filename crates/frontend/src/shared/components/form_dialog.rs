use leptos::prelude::*;
use thaw::*;

/// Dialog that mounts its form only while open, so every opening starts
/// from a fresh view model.
#[component]
pub fn FormDialog(
    open: RwSignal<bool>,
    #[prop(into)] title: Signal<String>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>{move || title.get()}</DialogTitle>
                    <DialogContent>
                        {move || open.get().then(|| children())}
                    </DialogContent>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
