use contracts::domain::common::ErpEntity;
use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Open tabs, the active one and the sidebar state.
///
/// The active tab key is mirrored to `?active=` so a reload lands on the same
/// page.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(active_key) = active_from_query(&search) {
            let title = super::tabs::tab_label_for_key(&active_key);
            self.open_tab(&active_key, &title);
        }

        let this = *self;
        Effect::new(move |_| {
            if let Some(active_key) = this.active.get() {
                let new_url = query_for_active(&active_key);
                let current_search = window()
                    .and_then(|w| w.location().search().ok())
                    .unwrap_or_default();

                if current_search != new_url {
                    if let Some(w) = window() {
                        if let Ok(history) = w.history() {
                            if let Err(e) = history.replace_state_with_url(
                                &wasm_bindgen::JsValue::NULL,
                                "",
                                Some(&new_url),
                            ) {
                                log::warn!("could not update url to {}: {:?}", new_url, e);
                            }
                        }
                    }
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            log::debug!("open tab {} ({})", key, title);
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                })
            });
        }
        self.activate_tab(key);
    }

    /// Tab with the form of an existing record of `T`.
    pub fn open_detail<T: ErpEntity>(&self, id: i64, title: &str) {
        self.open_tab(&T::detail_key(id), title);
    }

    /// Tab with an empty form of `T`.
    pub fn open_new<T: ErpEntity>(&self) {
        let key = new_key::<T>();
        self.open_tab(&key, &super::tabs::tab_label_for_key(&key));
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    pub fn update_tab_title(&self, key: &str, new_title: &str) {
        self.opened.update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = new_title.to_string();
            }
        });
    }

    pub fn close_tab(&self, key: &str) {
        log::debug!("close tab {}", key);
        self.opened.update(|tabs| tabs.retain(|tab| tab.key != key));
        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| tabs.last().map(|t| t.key.clone()));
            self.active.set(next_active);
        }
    }

    /// Swaps the "new record" tab for the tab of the record just created.
    pub fn replace_tab(&self, old_key: &str, new_key: &str, title: &str) {
        self.opened.update(|tabs| {
            tabs.retain(|t| t.key != new_key);
            match tabs.iter_mut().find(|t| t.key == old_key) {
                Some(tab) => {
                    tab.key = new_key.to_string();
                    tab.title = title.to_string();
                }
                None => tabs.push(Tab {
                    key: new_key.to_string(),
                    title: title.to_string(),
                }),
            }
        });
        self.activate_tab(new_key);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// `{index}_{collection}_new`
pub fn new_key<T: ErpEntity>() -> String {
    format!("{}_new", T::full_name())
}

/// `?active=...` value of a location search string.
pub fn active_from_query(search: &str) -> Option<String> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get("active").cloned().filter(|k| !k.is_empty())
}

pub fn query_for_active(active_key: &str) -> String {
    let params = HashMap::from([("active".to_string(), active_key.to_string())]);
    let query = serde_qs::to_string(&params).unwrap_or_default();
    format!("?{}", query)
}

pub fn use_app_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not provided in context")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a014_quotation::aggregate::Quotation;

    #[test]
    fn active_tab_survives_the_query_string() {
        let query = query_for_active("a014_quotation_detail_12");
        assert_eq!(query, "?active=a014_quotation_detail_12");
        assert_eq!(
            active_from_query(&query).as_deref(),
            Some("a014_quotation_detail_12")
        );
        assert_eq!(active_from_query(""), None);
        assert_eq!(active_from_query("?other=1"), None);
    }

    #[test]
    fn closing_the_active_tab_activates_the_last_one() {
        let ctx = AppGlobalContext::new();
        ctx.open_tab("a010_customer", "Clientes");
        ctx.open_tab("a018_product", "Productos");
        ctx.open_tab("a014_quotation", "Cotizaciones");
        ctx.activate_tab("a018_product");
        ctx.close_tab("a018_product");
        assert_eq!(ctx.active.get_untracked().as_deref(), Some("a014_quotation"));

        ctx.close_tab("a010_customer");
        assert_eq!(ctx.active.get_untracked().as_deref(), Some("a014_quotation"));
        assert_eq!(ctx.opened.get_untracked().len(), 1);
    }

    #[test]
    fn reopening_only_activates() {
        let ctx = AppGlobalContext::new();
        ctx.open_tab("a010_customer", "Clientes");
        ctx.open_tab("a018_product", "Productos");
        ctx.open_tab("a010_customer", "Clientes");
        assert_eq!(ctx.opened.get_untracked().len(), 2);
        assert_eq!(ctx.active.get_untracked().as_deref(), Some("a010_customer"));
    }

    #[test]
    fn created_record_replaces_the_new_tab() {
        let ctx = AppGlobalContext::new();
        ctx.open_new::<Quotation>();
        assert_eq!(ctx.active.get_untracked().as_deref(), Some("a014_quotation_new"));

        ctx.replace_tab("a014_quotation_new", &Quotation::detail_key(7), "Cotización COT-7");
        let tabs = ctx.opened.get_untracked();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].key, "a014_quotation_detail_7");
        assert_eq!(ctx.active.get_untracked().as_deref(), Some("a014_quotation_detail_7"));
    }
}
