use contracts::domain::a016_sale::aggregate::Sale;
use contracts::domain::a017_payment::aggregate::PaymentMethod;
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use thaw::*;

use super::payments::PaymentsSection;
use super::view_model::SaleDetailsVm;
use crate::config::use_config;
use crate::domain::a010_customer::api::use_customer_catalog;
use crate::domain::a013_customer_product::ui::use_special_prices;
use crate::domain::a016_sale::ui::list::status_color;
use crate::domain::a018_product::api::use_product_catalog;
use crate::layout::global_context::{new_key, use_app_context};
use crate::shared::components::{ErrorBox, FormField, LineItemsEditor, StatusBadge, TotalsPanel};
use crate::shared::document_form::CustomerSelect;
use crate::shared::format::format_date;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_DETAIL};
use crate::shared::toast::use_toast;

#[component]
pub fn SaleDetails(id: Option<i64>) -> impl IntoView {
    let config = use_config();
    let tabs = use_app_context();
    let vm = SaleDetailsVm::new(&config, use_toast(), tabs);
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
    let can_cancel = vm.can_cancel();
    let status = vm.status();
    let amount_paid = vm.amount_paid();
    let due_date = vm.due_date();
    let error = vm.error;
    let loading = vm.loading;
    let vm_save = vm.clone();
    let vm_cancel = vm.clone();
    let vm_payments = vm.clone();

    let tab_key = match id {
        Some(id) => Sale::detail_key(id),
        None => new_key::<Sale>(),
    };
    let current_key = {
        let vm_id = vm.id;
        move || vm_id.get_untracked().map(Sale::detail_key).unwrap_or(tab_key.clone())
    };

    view! {
        <PageFrame page_id=page_id(&Sale::full_name(), PAGE_CAT_DETAIL) category=PAGE_CAT_DETAIL>
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
                        on_click=move |_| vm_cancel.cancel_sale()
                        disabled=Signal::derive(move || !can_cancel.get())
                    >
                        {icon("alert")}
                        " Cancelar venta"
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
                        "Venta "
                        {move || {
                            let s = status.get();
                            view! { <StatusBadge label=s.label() color=status_color(s) /> }
                        }}
                    </h4>
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
                        <FormField label="Forma de pago">
                            <Select value=vm.payment_method>
                                {PaymentMethod::ALL
                                    .iter()
                                    .map(|m| view! { <option value=m.as_str()>{m.label()}</option> })
                                    .collect_view()}
                            </Select>
                        </FormField>
                        <FormField label="Vencimiento">
                            <div class="form__static">
                                {move || due_date.get().map(|d| format_date(&d)).unwrap_or_else(|| "Contado".into())}
                            </div>
                        </FormField>
                    </div>
                    <Show when=move || readonly.get() && is_edit_mode.get()>
                        <div class="form__hint">"Las partidas no se pueden modificar: la venta tiene pagos o está cancelada."</div>
                    </Show>
                </div>

                <div class="details-section">
                    <h4 class="details-section__title">"Partidas"</h4>
                    <LineItemsEditor
                        rows=doc.rows
                        products=products
                        price_overrides=special_prices
                        readonly=readonly
                    />
                    <TotalsPanel totals=doc.totals() iva_rate=doc.iva_rate amount_paid=amount_paid />
                </div>

                <div class="details-section">
                    <FormField label="Notas" wide=true>
                        <Textarea value=doc.notes placeholder="Opcional" attr:rows=2 />
                    </FormField>
                </div>

                <Show when=move || is_edit_mode.get()>
                    <PaymentsSection vm=vm_payments.clone() />
                </Show>
            </div>
        </PageFrame>
    }
}
