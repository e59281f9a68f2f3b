use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::api::use_crud;
use crate::shared::toast::use_toast;

/// `(value, label)` pairs of a reference `<select>`.
pub type SelectOptions = Vec<(String, String)>;

/// Active records of `T` as select options, loaded once.
pub fn use_reference_options<T: ErpEntity>() -> RwSignal<SelectOptions> {
    let options = RwSignal::new(Vec::new());
    let service = use_crud::<T>();
    let toast = use_toast();

    spawn_local(async move {
        match service.get_all().await {
            Ok(items) => options.set(to_options(&items)),
            Err(e) => {
                log::error!("{}: failed to load options: {}", T::full_name(), e);
                toast.api_error(&format!("No se pudo cargar {}", T::list_name()), &e);
            }
        }
    });

    options
}

pub fn to_options<T: ErpEntity>(items: &[T]) -> SelectOptions {
    items
        .iter()
        .filter(|item| item.is_active())
        .filter_map(|item| item.id().map(|id| (id.to_string(), item.display_name())))
        .collect()
}

/// Label of the option with `value`, if loaded.
pub fn option_label(options: &[(String, String)], value: &str) -> Option<String> {
    options
        .iter()
        .find(|(v, _)| v == value)
        .map(|(_, label)| label.clone())
}

/// Select bound to the text id of a referenced record ("" = none).
#[component]
pub fn ReferenceSelect(
    value: RwSignal<String>,
    #[prop(into)] options: Signal<SelectOptions>,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "-- Seleccione --"
    } else {
        placeholder
    };

    let disabled = Signal::derive(move || disabled.get().unwrap_or(false));

    view! {
        <Select value=value disabled=disabled>
            <option value="">{placeholder}</option>
            {move || {
                let current = value.get();
                options
                    .get()
                    .into_iter()
                    .map(|(id, label)| {
                        let selected = id == current;
                        view! { <option value=id selected=selected>{label}</option> }
                    })
                    .collect_view()
            }}
        </Select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_area::aggregate::Area;
    use contracts::domain::common::{CatalogBase, CatalogEntity};

    fn area(id: Option<i64>, name: &str, active: bool) -> Area {
        let mut base = CatalogBase::new(name, None);
        base.id = id;
        base.is_active = active;
        Area::from_base(base)
    }

    #[test]
    fn only_saved_active_records_become_options() {
        let items = vec![
            area(Some(1), "Producción", true),
            area(Some(2), "Almacén", false),
            area(None, "Borrador", true),
        ];
        assert_eq!(
            to_options(&items),
            vec![("1".to_string(), "Producción".to_string())]
        );
    }

    #[test]
    fn looks_up_labels() {
        let options = vec![("3".to_string(), "Ventas".to_string())];
        assert_eq!(option_label(&options, "3").as_deref(), Some("Ventas"));
        assert_eq!(option_label(&options, "4"), None);
    }
}
