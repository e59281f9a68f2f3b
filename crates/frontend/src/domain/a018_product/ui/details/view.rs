use leptos::prelude::*;
use thaw::*;

use super::view_model::ProductDetailsVm;
use crate::domain::a018_product::api::use_service;
use crate::shared::components::{ErrorBox, FormField};
use crate::shared::format::format_percent;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

#[component]
pub fn ProductDetails(
    id: Option<i64>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = ProductDetailsVm::new(use_service(), use_toast());
    if let Some(id) = id {
        vm.load(id);
    }

    let is_edit_mode = vm.is_edit_mode();
    let is_save_disabled = vm.is_save_disabled();
    let margin = vm.margin();
    let error = vm.error;
    let vm_save = vm.clone();

    view! {
        <div class="details-container product-details">
            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="details-grid">
                <FormField label="SKU" required=true>
                    <Input value=vm.sku placeholder="Código interno" />
                </FormField>
                <FormField label="Unidad">
                    <Input value=vm.unit placeholder="PZA" />
                </FormField>
                <FormField label="Nombre" required=true wide=true>
                    <Input value=vm.name placeholder="Nombre del producto" />
                </FormField>
                <FormField label="Descripción" wide=true>
                    <Textarea value=vm.description placeholder="Opcional" attr:rows=2 />
                </FormField>
                <FormField label="Precio de venta">
                    <Input value=vm.unit_price input_type=InputType::Number placeholder="0.00" />
                </FormField>
                <FormField label="Costo">
                    <Input value=vm.cost input_type=InputType::Number placeholder="0.00" />
                </FormField>
                <div class="form__hint form__group--wide">
                    {move || match margin.get() {
                        Some(m) => format!("Margen: {}", format_percent(m)),
                        None => "Margen: -".to_string(),
                    }}
                </div>
                <FormField label="Existencia">
                    <Input value=vm.stock input_type=InputType::Number placeholder="0" />
                </FormField>
                <FormField label="Stock mínimo">
                    <Input value=vm.min_stock input_type=InputType::Number placeholder="0" />
                </FormField>
            </div>

            <div class="details-flags">
                <Checkbox checked=vm.applies_iva label="Causa IVA" />
                <Checkbox checked=vm.is_active label="Activo" />
            </div>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| vm_save.save(on_saved)
                    disabled=is_save_disabled
                >
                    {icon("save")}
                    {move || if is_edit_mode.get() { " Guardar" } else { " Crear" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    {icon("cancel")}
                    " Cancelar"
                </Button>
            </div>
        </div>
    }
}
