//! Search and sort helpers shared by every list page.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;

/// Filters shorter than this are ignored.
pub const MIN_FILTER_LEN: usize = 2;

const SEARCH_DEBOUNCE_MS: u32 = 300;

pub trait Searchable {
    /// Whether the row matches an already normalized filter.
    fn matches_filter(&self, filter: &str) -> bool;
}

pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Lowercase and without Spanish accents, so "Jose" finds "José".
pub fn normalize_search(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' => 'a',
            'é' | 'è' | 'ë' => 'e',
            'í' | 'ì' | 'ï' => 'i',
            'ó' | 'ò' | 'ö' => 'o',
            'ú' | 'ù' | 'ü' => 'u',
            other => other,
        })
        .collect()
}

/// True when any of the fields contains the normalized filter.
pub fn any_field_matches<'a>(fields: impl IntoIterator<Item = &'a str>, filter: &str) -> bool {
    fields
        .into_iter()
        .any(|field| normalize_search(field).contains(filter))
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let filter = normalize_search(filter);
    if filter.chars().count() < MIN_FILTER_LEN {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(&filter))
        .collect()
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Case- and accent-insensitive text comparison for sorting.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    normalize_search(a).cmp(&normalize_search(b))
}

pub fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Search box with debounce and a clear button.
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };
    let input_value = RwSignal::new(value.get_untracked());
    // Only the latest keystroke fires.
    let generation = StoredValue::new(0u64);

    let handle_input = move |new_value: String| {
        input_value.set(new_value.clone());
        let current = generation.get_value() + 1;
        generation.set_value(current);
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.get_value() == current {
                on_change.run(new_value);
            }
        });
    };

    let is_filter_active =
        move || normalize_search(&value.get()).chars().count() >= MIN_FILTER_LEN;

    let clear = move |_| {
        generation.update_value(|g| *g += 1);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" class:search-input--active=is_filter_active>
            {crate::shared::icons::icon("search")}
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" title="Limpiar" on:click=clear>
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        amount: f64,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            any_field_matches([self.name], filter)
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "amount" => compare_f64(self.amount, other.amount),
                _ => compare_text(self.name, other.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Producción", amount: 10.0 },
            Row { name: "almacén", amount: 30.0 },
            Row { name: "Ventas", amount: 20.0 },
        ]
    }

    #[test]
    fn filter_ignores_case_and_accents() {
        let found = filter_list(rows(), "PRODUCCION");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Producción");

        assert_eq!(filter_list(rows(), "alma").len(), 1);
        assert!(filter_list(rows(), "zzz").is_empty());
    }

    #[test]
    fn short_filter_keeps_everything() {
        assert_eq!(filter_list(rows(), "v").len(), 3);
        assert_eq!(filter_list(rows(), "   ").len(), 3);
    }

    #[test]
    fn sorts_by_field_and_direction() {
        let mut items = rows();
        sort_list(&mut items, "name", true);
        let names: Vec<_> = items.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["almacén", "Producción", "Ventas"]);

        sort_list(&mut items, "amount", false);
        let amounts: Vec<_> = items.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![30.0, 20.0, 10.0]);
    }

    #[test]
    fn sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("amount", "name", true), " ⇅");
    }
}
