//! Toast notifications.
//!
//! `ToastService` lives in context; `ToastHost` is mounted once at the root
//! and renders the stack in the bottom-right corner.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;
use contracts::shared::error::ApiError;

const SUCCESS_TIMEOUT_MS: u32 = 3_000;
const ERROR_TIMEOUT_MS: u32 = 6_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
            ToastKind::Info => "toast toast--info",
            ToastKind::Warning => "toast toast--warning",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastKind::Success => "check",
            ToastKind::Error => "alert",
            ToastKind::Info => "info",
            ToastKind::Warning => "alert",
        }
    }

    fn timeout_ms(&self) -> u32 {
        match self {
            ToastKind::Success | ToastKind::Info => SUCCESS_TIMEOUT_MS,
            ToastKind::Error | ToastKind::Warning => ERROR_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastKind::Info, message.into());
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(ToastKind::Warning, message.into());
    }

    pub fn show(&self, kind: ToastKind, message: impl Into<String>) {
        self.push(kind, message.into());
    }

    /// Error toast for a failed request, prefixed with what was being done.
    pub fn api_error(&self, action: &str, error: &ApiError) {
        self.error(format!("{}: {}", action, error.user_message()));
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|toast| toast.id != id));
    }

    fn push(&self, kind: ToastKind, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|t| t.push(Toast { id, kind, message }));

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(kind.timeout_ms()).await;
            svc.dismiss(id);
        });
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

/// One toast for a bulk delete: success when nothing failed, error when
/// nothing was deleted, warning otherwise.
pub fn bulk_delete_summary(deleted: usize, failed: usize) -> (ToastKind, String) {
    if failed == 0 {
        (ToastKind::Success, format!("{} registros eliminados", deleted))
    } else if deleted == 0 {
        (
            ToastKind::Error,
            format!("No se eliminó ningún registro ({} fallidos)", failed),
        )
    } else {
        (
            ToastKind::Warning,
            format!("{} eliminados / {} fallidos", deleted, failed),
        )
    }
}

pub fn use_toast() -> ToastService {
    use_context::<ToastService>().expect("ToastService not provided in context")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_toast();

    view! {
        <div class="toast-host">
            <For
                each=move || svc.toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() role="status">
                            <span class="toast__icon">{icon(toast.kind.icon())}</span>
                            <span class="toast__message">{toast.message}</span>
                            <button class="toast__close" title="Cerrar" on:click=move |_| svc.dismiss(id)>
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_delete_summaries() {
        assert_eq!(
            bulk_delete_summary(3, 0),
            (ToastKind::Success, "3 registros eliminados".to_string())
        );
        assert_eq!(
            bulk_delete_summary(2, 1),
            (ToastKind::Warning, "2 eliminados / 1 fallidos".to_string())
        );
        assert_eq!(bulk_delete_summary(0, 4).0, ToastKind::Error);
    }

    #[test]
    fn errors_stay_longer_than_confirmations() {
        assert!(ToastKind::Error.timeout_ms() > ToastKind::Success.timeout_ms());
        assert_eq!(ToastKind::Warning.class(), "toast toast--warning");
    }
}
