use leptos::prelude::*;
use thaw::*;

use super::tabs::GeneralTab;
use super::view_model::{CustomerDetailsVm, TAB_ADDRESSES, TAB_FISCAL, TAB_GENERAL, TAB_PRODUCTS};
use crate::domain::a010_customer::api::use_service;
use crate::domain::a011_customer_delivery_address::ui::AddressesPanel;
use crate::domain::a012_customer_fiscal_data::ui::FiscalDataPanel;
use crate::domain::a013_customer_product::ui::CustomerProductsPanel;
use crate::shared::components::ErrorBox;
use crate::shared::icons::icon;
use crate::shared::toast::use_toast;

#[component]
pub fn CustomerDetails(
    id: Option<i64>,
    #[prop(into)] on_saved: Callback<()>,
    #[prop(into)] on_created: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let vm = CustomerDetailsVm::new(use_service(), use_toast());
    if let Some(id) = id {
        vm.load(id);
    }

    let error = vm.error;
    let loading = vm.loading;

    view! {
        <div class="details-container customer-details">
            <Header vm=vm.clone() on_saved=on_saved on_created=on_created on_cancel=on_cancel />
            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}
            <Show when=move || loading.get()>
                <Spinner size=SpinnerSize::Small label="Cargando..." />
            </Show>
            <TabBar vm=vm.clone() />
            <div class="details-tab-content">
                <TabContent vm=vm />
            </div>
        </div>
    }
}

#[component]
fn Header(
    vm: CustomerDetailsVm,
    on_saved: Callback<()>,
    on_created: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let is_edit_mode = vm.is_edit_mode();
    let is_save_disabled = vm.is_save_disabled();

    view! {
        <div class="details-actions details-actions--top">
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| vm.save(on_saved, on_created)
                disabled=is_save_disabled
            >
                {icon("save")}
                {move || if is_edit_mode.get() { " Guardar" } else { " Crear" }}
            </Button>
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                {icon("cancel")}
                " Cerrar"
            </Button>
        </div>
    }
}

#[component]
fn TabBar(vm: CustomerDetailsVm) -> impl IntoView {
    let active_tab = vm.active_tab;
    let is_edit_mode = vm.is_edit_mode();

    let tab = move |key: &'static str,
                    label: &'static str,
                    icon_name: &'static str,
                    needs_id: bool| {
        let vm = vm.clone();
        view! {
            <Button
                appearance=Signal::derive(move || {
                    if active_tab.get() == key { ButtonAppearance::Primary } else { ButtonAppearance::Subtle }
                })
                size=ButtonSize::Small
                disabled=Signal::derive(move || needs_id && !is_edit_mode.get())
                on_click=move |_| vm.set_tab(key)
            >
                <span class="tab-icon">{icon(icon_name)}</span>
                {label}
            </Button>
        }
    };

    view! {
        <div class="details-tabs">
            <Flex gap=FlexGap::Small align=FlexAlign::Center>
                {tab(TAB_GENERAL, "General", "file-text", false)}
                {tab(TAB_ADDRESSES, "Direcciones", "list", true)}
                {tab(TAB_FISCAL, "Datos fiscales", "invoices", true)}
                {tab(TAB_PRODUCTS, "Productos", "products", true)}
            </Flex>
        </div>
        <Show when=move || !is_edit_mode.get()>
            <div class="form__hint">"Guarde el cliente para capturar direcciones, datos fiscales y productos."</div>
        </Show>
    }
}

#[component]
fn TabContent(vm: CustomerDetailsVm) -> impl IntoView {
    let active_tab = vm.active_tab;
    let id = vm.id;

    move || match (active_tab.get(), id.get()) {
        (TAB_ADDRESSES, Some(customer_id)) => {
            view! { <AddressesPanel customer_id=customer_id /> }.into_any()
        }
        (TAB_FISCAL, Some(customer_id)) => {
            view! { <FiscalDataPanel customer_id=customer_id /> }.into_any()
        }
        (TAB_PRODUCTS, Some(customer_id)) => {
            view! { <CustomerProductsPanel customer_id=customer_id /> }.into_any()
        }
        _ => view! { <GeneralTab vm=vm.clone() /> }.into_any(),
    }
}
