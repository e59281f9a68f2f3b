use contracts::domain::common::{CatalogBase, CatalogEntity};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::api::CrudService;
use crate::shared::components::form::{opt_text, text_of};
use crate::shared::components::{ErrorBox, FormField};
use crate::shared::format::format_datetime;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

/// Create/edit form of one catalog record, shown inside the list's dialog.
#[component]
pub fn CatalogDetails<T>(
    service: CrudService<T>,
    /// `None` creates a new record
    item: Option<T>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView
where
    T: CatalogEntity + Send + Sync,
{
    let toast = use_toast();
    let original = item.map(|i| i.base().clone()).unwrap_or_default();
    let is_edit = original.id.is_some();
    let last_modified = original.audit.last_modified().map(format_datetime);

    let name = RwSignal::new(original.name.clone());
    let description = RwSignal::new(text_of(&original.description));
    let is_active = RwSignal::new(original.is_active);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let original = StoredValue::new(original);

    let build = move || -> T {
        let mut base: CatalogBase = original.get_value();
        base.name = name.get_untracked();
        base.description = opt_text(description.get_untracked());
        base.is_active = is_active.get_untracked();
        base.normalize();
        T::from_base(base)
    };

    let handle_save = move |_| {
        let record = build();
        if let Err(msg) = record.validate() {
            error.set(Some(msg));
            return;
        }
        error.set(None);
        saving.set(true);
        let service = service.clone();
        spawn_local(async move {
            match service.save(&record).await {
                Ok(saved) => {
                    toast.success(format!(
                        "{} \"{}\" guardado",
                        T::element_name(),
                        saved.base().name
                    ));
                    on_saved.run(());
                }
                Err(e) => {
                    error.set(Some(e.user_message()));
                    toast.api_error("No se pudo guardar", &e);
                }
            }
            saving.set(false);
        });
    };

    view! {
        <div class="details-container catalog-details">
            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="details-grid">
                <FormField label="Nombre" required=true wide=true>
                    <Input value=name placeholder="Nombre" />
                </FormField>
                <FormField label="Descripción" wide=true>
                    <Textarea value=description placeholder="Opcional" attr:rows=3 />
                </FormField>
                <div class="details-flags">
                    <Checkbox checked=is_active label="Activo" />
                </div>
            </div>
            {last_modified.map(|ts| view! {
                <div class="form__hint">"Última modificación: " {ts}</div>
            })}

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=handle_save
                    disabled=Signal::derive(move || saving.get() || name.get().trim().is_empty())
                >
                    {icon("save")}
                    {if is_edit { " Guardar" } else { " Crear" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("cancel")}
                    " Cancelar"
                </Button>
            </div>
        </div>
    }
}
