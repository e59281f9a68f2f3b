use leptos::prelude::*;
use thaw::*;

use super::super::view_model::CustomerDetailsVm;
use crate::shared::components::FormField;

#[component]
pub fn GeneralTab(vm: CustomerDetailsVm) -> impl IntoView {
    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Datos generales"</h4>
            <div class="details-grid--3col">
                <FormField label="Código">
                    <Input value=vm.code placeholder="Opcional" />
                </FormField>
                <FormField label="Razón social" required=true wide=true>
                    <Input value=vm.business_name placeholder="Nombre legal del cliente" />
                </FormField>
                <FormField label="Nombre comercial" wide=true>
                    <Input value=vm.trade_name placeholder="Opcional" />
                </FormField>
                <FormField label="Contacto">
                    <Input value=vm.contact_name />
                </FormField>
                <FormField label="Correo">
                    <Input value=vm.email input_type=InputType::Email />
                </FormField>
                <FormField label="Teléfono">
                    <Input value=vm.phone placeholder="10 dígitos" />
                </FormField>
            </div>
        </div>

        <div class="details-section">
            <h4 class="details-section__title">"Crédito"</h4>
            <div class="details-grid--3col">
                <FormField label="Límite de crédito">
                    <Input value=vm.credit_limit input_type=InputType::Number placeholder="0.00" />
                </FormField>
                <FormField label="Días de crédito">
                    <Input value=vm.credit_days input_type=InputType::Number placeholder="0" />
                </FormField>
            </div>
            <FormField label="Notas" wide=true>
                <Textarea value=vm.notes placeholder="Opcional" attr:rows=3 />
            </FormField>
            <div class="details-flags">
                <Checkbox checked=vm.is_active label="Activo" />
            </div>
        </div>
    }
}
