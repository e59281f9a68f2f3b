use contracts::domain::a015_order::aggregate::{Order, OrderStatus};
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use thaw::*;

use super::view_model::OrderDetailsVm;
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
pub fn OrderDetails(id: Option<i64>) -> impl IntoView {
    let config = use_config();
    let tabs = use_app_context();
    let vm = OrderDetailsVm::new(&config, use_toast(), tabs);
    if let Some(id) = id {
        vm.load(id);
    }

    let doc = vm.doc;
    let customers = use_customer_catalog();
    Effect::new(move |_| doc.customers.set(customers.get()));
    let products = use_product_catalog();
    let special_prices = use_special_prices(doc.selected_customer_id(), products);

    let selected_customer = doc.selected_customer_id();
    {
        let vm = vm.clone();
        Effect::new(move |_| vm.load_addresses(selected_customer.get()));
    }

    let is_edit_mode = vm.is_edit_mode();
    let is_save_disabled = vm.is_save_disabled();
    let readonly = vm.is_readonly();
    let can_convert = vm.can_convert();
    let quotation_id = vm.quotation_id();
    let linked_sale = vm.linked_sale();
    let addresses = vm.addresses;
    let delivery_address_id = vm.delivery_address_id;
    let error = vm.error;
    let loading = vm.loading;
    let vm_save = vm.clone();
    let vm_convert = vm.clone();
    let vm_quotation = vm.clone();
    let vm_sale = vm.clone();

    let tab_key = match id {
        Some(id) => Order::detail_key(id),
        None => new_key::<Order>(),
    };
    let current_key = {
        let vm_id = vm.id;
        move || vm_id.get_untracked().map(Order::detail_key).unwrap_or(tab_key.clone())
    };

    view! {
        <PageFrame page_id=page_id(&Order::full_name(), PAGE_CAT_DETAIL) category=PAGE_CAT_DETAIL>
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
                        on_click=move |_| vm_convert.convert_to_sale()
                        disabled=Signal::derive(move || !can_convert.get())
                    >
                        {icon("arrow-right")}
                        " Convertir a venta"
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
                    <h4 class="details-section__title">"Pedido"</h4>
                    {move || quotation_id.get().map(|qid| {
                        let vm_quotation = vm_quotation.clone();
                        view! {
                            <div class="form__hint">
                                "Generado desde la "
                                <a
                                    href="#"
                                    class="table__link"
                                    on:click=move |e| {
                                        e.prevent_default();
                                        vm_quotation.open_quotation();
                                    }
                                >
                                    {format!("cotización #{}", qid)}
                                </a>
                            </div>
                        }
                    })}
                    {move || linked_sale.get().map(|(_, title)| {
                        let vm_sale = vm_sale.clone();
                        view! {
                            <div class="form__hint">
                                "Convertido en "
                                <a
                                    href="#"
                                    class="table__link"
                                    on:click=move |e| {
                                        e.prevent_default();
                                        vm_sale.open_sale();
                                    }
                                >
                                    {title.to_lowercase()}
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
                        <FormField label="Fecha de entrega">
                            <Input value=vm.delivery_date input_type=InputType::Date />
                        </FormField>
                        <FormField label="Estado">
                            <Select value=vm.status>
                                {OrderStatus::ALL
                                    .iter()
                                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                    .collect_view()}
                            </Select>
                        </FormField>
                        <FormField label="Dirección de entrega" wide=true>
                            <Select value=delivery_address_id>
                                <option value="">"-- Sin dirección --"</option>
                                {move || {
                                    let current = delivery_address_id.get();
                                    addresses
                                        .get()
                                        .into_iter()
                                        .filter_map(|a| {
                                            let id = a.id?.to_string();
                                            let selected = id == current;
                                            let label = match a.alias.as_deref().filter(|s| !s.trim().is_empty()) {
                                                Some(alias) => format!("{}: {}", alias, a.one_line()),
                                                None => a.one_line(),
                                            };
                                            Some(view! { <option value=id selected=selected>{label}</option> })
                                        })
                                        .collect_view()
                                }}
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
                        <Textarea value=doc.notes placeholder="Indicaciones de entrega..." attr:rows=3 />
                    </FormField>
                </div>
            </div>
        </PageFrame>
    }
}
