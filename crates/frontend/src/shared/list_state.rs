//! State and commands shared by every entity list page.
//!
//! One `ListState<T>` per mounted list: the loaded records, the search/sort
//! settings and the bulk selection, plus the fetch and delete commands that
//! report through toasts.

use std::collections::HashSet;

use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::CrudService;
use crate::shared::list_utils::{filter_list, sort_list, Searchable, Sortable};
use crate::shared::toast::{bulk_delete_summary, use_toast, ToastService};

/// Browser confirm dialog; `false` when there is no window.
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|win| win.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[derive(Clone)]
pub struct ListState<T: ErpEntity + Send + Sync> {
    pub service: CrudService<T>,
    pub items: RwSignal<Vec<T>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    pub filter: RwSignal<String>,
    pub sort_field: RwSignal<String>,
    pub sort_ascending: RwSignal<bool>,
    pub selected: RwSignal<HashSet<i64>>,
    toast: ToastService,
}

impl<T: ErpEntity + Send + Sync> ListState<T> {
    pub fn new(service: CrudService<T>, sort_field: &str, sort_ascending: bool) -> Self {
        Self {
            service,
            items: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
            filter: RwSignal::new(String::new()),
            sort_field: RwSignal::new(sort_field.to_string()),
            sort_ascending: RwSignal::new(sort_ascending),
            selected: RwSignal::new(HashSet::new()),
            toast: use_toast(),
        }
    }

    pub fn fetch(&self) {
        let this = self.clone();
        this.loading.set(true);
        spawn_local(async move {
            match this.service.get_all().await {
                Ok(items) => {
                    log::debug!("{}: loaded {} records", T::full_name(), items.len());
                    this.items.set(items);
                    this.error.set(None);
                }
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast
                        .api_error(&format!("No se pudo cargar {}", T::list_name()), &e);
                }
            }
            this.loading.set(false);
        });
    }

    /// Filtered and sorted copy of the loaded records.
    pub fn visible(&self) -> Vec<T>
    where
        T: Searchable + Sortable,
    {
        let mut rows = filter_list(self.items.get(), &self.filter.get());
        sort_list(&mut rows, &self.sort_field.get(), self.sort_ascending.get());
        rows
    }

    pub fn toggle_sort(&self, field: &str) {
        if self.sort_field.get_untracked() == field {
            self.sort_ascending.update(|v| *v = !*v);
        } else {
            self.sort_field.set(field.to_string());
            self.sort_ascending.set(true);
        }
    }

    pub fn toggle_selected(&self, id: i64, checked: bool) {
        self.selected.update(|s| {
            if checked {
                s.insert(id);
            } else {
                s.remove(&id);
            }
        });
    }

    pub fn set_all_selected(&self, ids: Vec<i64>, checked: bool) {
        if checked {
            self.selected.update(|s| s.extend(ids));
        } else {
            self.selected.set(HashSet::new());
        }
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.with(|s| s.contains(&id))
    }

    /// At least one id and all of them selected.
    pub fn all_selected(&self, ids: &[i64]) -> bool {
        !ids.is_empty() && self.selected.with(|s| ids.iter().all(|id| s.contains(id)))
    }

    pub fn delete_one(&self, item: &T) {
        let Some(id) = item.id() else {
            return;
        };
        if !confirm(&format!(
            "¿Eliminar {} \"{}\"?",
            T::element_name().to_lowercase(),
            item.display_name()
        )) {
            return;
        }
        let this = self.clone();
        spawn_local(async move {
            match this.service.delete(id).await {
                Ok(()) => {
                    this.toast.success(format!("{} eliminado", T::element_name()));
                    this.selected.update(|s| {
                        s.remove(&id);
                    });
                    this.fetch();
                }
                Err(e) => this.toast.api_error("No se pudo eliminar", &e),
            }
        });
    }

    /// Deletes the selection one by one, then refreshes once and reports
    /// a single summary toast.
    pub fn delete_selected(&self) {
        let ids: Vec<i64> = self.selected.get_untracked().into_iter().collect();
        if ids.is_empty() {
            return;
        }
        if !confirm(&format!(
            "¿Eliminar los registros seleccionados? Cantidad: {}",
            ids.len()
        )) {
            return;
        }
        let this = self.clone();
        spawn_local(async move {
            let (deleted, failed) = this.service.delete_many(&ids).await;
            let (kind, message) = bulk_delete_summary(deleted, failed);
            this.toast.show(kind, message);
            this.selected.set(HashSet::new());
            this.fetch();
        });
    }

    /// Saves a modified copy of a record (e.g. toggled `is_active`) and refreshes.
    pub fn save_inline(&self, item: T) {
        let this = self.clone();
        spawn_local(async move {
            match this.service.update(&item).await {
                Ok(_) => {
                    this.toast.success("Cambios guardados");
                    this.fetch();
                }
                Err(e) => this.toast.api_error("No se pudo guardar", &e),
            }
        });
    }
}
