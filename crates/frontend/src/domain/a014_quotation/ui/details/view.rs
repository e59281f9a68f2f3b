use contracts::domain::a014_quotation::aggregate::{Quotation, QuotationStatus};
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use thaw::*;

use super::view_model::QuotationDetailsVm;
use crate::config::use_config;
use crate::domain::a010_customer::api::use_customer_catalog;
use crate::domain::a013_customer_product::ui::use_special_prices;
use crate::domain::a018_product::api::use_product_catalog;
use crate::layout::global_context::{new_key, use_app_context};
use crate::shared::components::{ErrorBox, FormField, LineItemsEditor, TotalsPanel};
use crate::shared::document_form::CustomerSelect;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_DETAIL};
use crate::shared::toast::use_toast;

#[component]
pub fn QuotationDetails(id: Option<i64>) -> impl IntoView {
    let config = use_config();
    let tabs = use_app_context();
    let vm = QuotationDetailsVm::new(&config, use_toast(), tabs);
    if let Some(id) = id {
        vm.load(id);
    }

    let doc = vm.doc;
    let customers = use_customer_catalog();
    Effect::new(move |_| doc.customers.set(customers.get()));
    let products = use_product_catalog();
    let special_prices = use_special_prices(doc.selected_customer_id(), products);

    let is_edit_mode = vm.is_edit_mode();
    let is_save_disabled = vm.is_save_disabled();
    let readonly = vm.is_readonly();
    let is_expired = vm.is_expired();
    let can_convert = vm.can_convert();
    let linked_order = vm.linked_order;
    let error = vm.error;
    let loading = vm.loading;
    let vm_save = vm.clone();
    let vm_convert = vm.clone();
    let vm_order = vm.clone();

    let tab_key = match id {
        Some(id) => Quotation::detail_key(id),
        None => new_key::<Quotation>(),
    };
    let current_key = {
        let vm_id = vm.id;
        move || vm_id.get_untracked().map(Quotation::detail_key).unwrap_or(tab_key.clone())
    };

    view! {
        <PageFrame page_id=page_id(&Quotation::full_name(), PAGE_CAT_DETAIL) category=PAGE_CAT_DETAIL>
            <div class="details-container document-details">
                <div class="details-actions details-actions--top">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm_save.save()
                        disabled=is_save_disabled
                    >
                        {icon("save")}
                        {move || if is_edit_mode.get() { " Guardar" } else { " Crear" }}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm_convert.convert_to_order()
                        disabled=Signal::derive(move || !can_convert.get())
                    >
                        {icon("arrow-right")}
                        " Convertir a pedido"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| tabs.close_tab(&current_key())
                    >
                        {icon("cancel")}
                        " Cerrar"
                    </Button>
                </div>

                {move || error.get().map(|e| view! { <ErrorBox message=e /> })}
                <Show when=move || loading.get()>
                    <Spinner size=SpinnerSize::Small label="Cargando..." />
                </Show>

                <div class="details-section">
                    <h4 class="details-section__title">
                        "Cotización "
                        <Show when=move || is_expired.get()>
                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                                "Vencida"
                            </Badge>
                        </Show>
                    </h4>
                    {move || linked_order.get().map(|order| {
                        let vm_order = vm_order.clone();
                        view! {
                            <div class="form__hint">
                                "Convertida en "
                                <a
                                    href="#"
                                    class="table__link"
                                    on:click=move |e| {
                                        e.prevent_default();
                                        vm_order.open_order();
                                    }
                                >
                                    {order.display_name().to_lowercase()}
                                </a>
                            </div>
                        }
                    })}
                    <div class="details-grid--3col">
                        <FormField label="Folio">
                            <Input value=doc.folio placeholder="Asignado al guardar" />
                        </FormField>
                        <FormField label="Cliente" required=true wide=true>
                            <CustomerSelect form=doc disabled=readonly />
                        </FormField>
                        <FormField label="Fecha" required=true>
                            <Input value=doc.date input_type=InputType::Date />
                        </FormField>
                        <FormField label="Válida hasta">
                            <Input value=vm.valid_until input_type=InputType::Date />
                        </FormField>
                        <FormField label="Estado">
                            <Select value=vm.status>
                                {QuotationStatus::ALL
                                    .iter()
                                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                    .collect_view()}
                            </Select>
                        </FormField>
                    </div>
                </div>

                <div class="details-section">
                    <h4 class="details-section__title">"Partidas"</h4>
                    <LineItemsEditor
                        rows=doc.rows
                        products=products
                        price_overrides=special_prices
                        readonly=readonly
                    />
                    <TotalsPanel totals=doc.totals() iva_rate=doc.iva_rate />
                </div>

                <div class="details-section">
                    <FormField label="Notas" wide=true>
                        <Textarea value=doc.notes placeholder="Condiciones, tiempos de entrega..." attr:rows=3 />
                    </FormField>
                </div>
            </div>
        </PageFrame>
    }
}
