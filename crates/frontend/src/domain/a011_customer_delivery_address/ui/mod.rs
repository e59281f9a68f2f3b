//! Delivery addresses of one customer, edited inside the customer dialog.

use contracts::domain::a011_customer_delivery_address::aggregate::CustomerDeliveryAddress;
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api::{use_service, CustomerDeliveryAddressService};
use crate::shared::components::form::{opt_text, text_of};
use crate::shared::components::{ErrorBox, FormField};
use crate::shared::format::or_dash;
use crate::shared::icons::icon;
use crate::shared::list_state::confirm;
use crate::shared::toast::{use_toast, ToastService};

/// Other addresses still flagged as default after `saved` became the default.
pub fn defaults_to_clear(
    addresses: &[CustomerDeliveryAddress],
    saved: &CustomerDeliveryAddress,
) -> Vec<CustomerDeliveryAddress> {
    if !saved.is_default {
        return Vec::new();
    }
    addresses
        .iter()
        .filter(|a| a.is_default && a.id.is_some() && a.id != saved.id)
        .map(|a| CustomerDeliveryAddress {
            is_default: false,
            ..a.clone()
        })
        .collect()
}

fn load(
    service: CustomerDeliveryAddressService,
    toast: ToastService,
    customer_id: i64,
    items: RwSignal<Vec<CustomerDeliveryAddress>>,
    loading: RwSignal<bool>,
) {
    loading.set(true);
    spawn_local(async move {
        match service.get_by_customer(customer_id).await {
            Ok(list) => items.set(list),
            Err(e) => toast.api_error("No se pudieron cargar las direcciones", &e),
        }
        loading.set(false);
    });
}

#[component]
pub fn AddressesPanel(customer_id: i64) -> impl IntoView {
    let service = use_service();
    let toast = use_toast();
    let items = RwSignal::new(Vec::<CustomerDeliveryAddress>::new());
    let loading = RwSignal::new(false);
    let editing = RwSignal::new(None::<CustomerDeliveryAddress>);

    let reload = {
        let service = service.clone();
        move || load(service.clone(), toast, customer_id, items, loading)
    };
    reload();

    let on_saved = {
        let service = service.clone();
        let reload = reload.clone();
        Callback::new(move |saved: CustomerDeliveryAddress| {
            editing.set(None);
            let stale = defaults_to_clear(&items.get_untracked(), &saved);
            let service = service.clone();
            let reload = reload.clone();
            spawn_local(async move {
                for address in stale {
                    if let Err(e) = service.update(&address).await {
                        log::warn!("address {:?}: could not clear default flag: {}", address.id, e);
                    }
                }
                reload();
            });
        })
    };

    let delete = {
        let service = service.clone();
        let reload = reload.clone();
        move |address: CustomerDeliveryAddress| {
            let Some(id) = address.id else {
                return;
            };
            if !confirm(&format!("¿Eliminar la dirección \"{}\"?", address.display_name())) {
                return;
            }
            let service = service.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match service.delete(id).await {
                    Ok(()) => {
                        toast.success("Dirección eliminada");
                        reload();
                    }
                    Err(e) => toast.api_error("No se pudo eliminar la dirección", &e),
                }
            });
        }
    };

    view! {
        <div class="details-section">
            <div class="details-section__header">
                <h4 class="details-section__title">"Direcciones de entrega"</h4>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| editing.set(Some(CustomerDeliveryAddress::for_customer(customer_id)))
                >
                    {icon("plus")}
                    " Agregar dirección"
                </Button>
            </div>

            {move || editing.get().map(|address| view! {
                <AddressForm
                    address=address
                    on_saved=on_saved
                    on_cancel=Callback::new(move |_| editing.set(None))
                />
            })}

            <Show when=move || loading.get()>
                <Spinner size=SpinnerSize::Small />
            </Show>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=120.0>"Alias"</TableHeaderCell>
                        <TableHeaderCell min_width=320.0>"Dirección"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"Teléfono"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>""</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let delete = delete.clone();
                        items.get().into_iter().map(|address| {
                            let for_edit = address.clone();
                            let for_delete = address.clone();
                            let delete = delete.clone();
                            view! {
                                <TableRow>
                                    <TableCell clone:address>{or_dash(address.alias.as_deref())}</TableCell>
                                    <TableCell clone:address>
                                        <TableCellLayout truncate=true>{address.one_line()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>{or_dash(address.contact_phone.as_deref())}</TableCell>
                                    <TableCell>
                                        {address.is_default.then(|| view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>
                                                "Predeterminada"
                                            </Badge>
                                        })}
                                    </TableCell>
                                    <TableCell>
                                        <TableCellLayout>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                attr:title="Editar"
                                                on_click=move |_| editing.set(Some(for_edit.clone()))
                                            >
                                                {icon("edit")}
                                            </Button>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                attr:title="Eliminar"
                                                on_click=move |_| delete(for_delete.clone())
                                            >
                                                {icon("delete")}
                                            </Button>
                                        </TableCellLayout>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()
                    }}
                </TableBody>
            </Table>
            <Show when=move || items.with(|i| i.is_empty()) && !loading.get()>
                <div class="table__empty">"El cliente no tiene direcciones de entrega"</div>
            </Show>
        </div>
    }
}

#[component]
fn AddressForm(
    address: CustomerDeliveryAddress,
    on_saved: Callback<CustomerDeliveryAddress>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let service = use_service();
    let toast = use_toast();

    let alias = RwSignal::new(text_of(&address.alias));
    let street = RwSignal::new(address.street.clone());
    let exterior_number = RwSignal::new(text_of(&address.exterior_number));
    let interior_number = RwSignal::new(text_of(&address.interior_number));
    let neighborhood = RwSignal::new(text_of(&address.neighborhood));
    let city = RwSignal::new(address.city.clone());
    let state = RwSignal::new(text_of(&address.state));
    let zip_code = RwSignal::new(text_of(&address.zip_code));
    let country = RwSignal::new(address.country.clone());
    let contact_phone = RwSignal::new(text_of(&address.contact_phone));
    let is_default = RwSignal::new(address.is_default);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let original = StoredValue::new(address);

    let build = move || CustomerDeliveryAddress {
        alias: opt_text(alias.get_untracked()),
        street: street.get_untracked().trim().to_string(),
        exterior_number: opt_text(exterior_number.get_untracked()),
        interior_number: opt_text(interior_number.get_untracked()),
        neighborhood: opt_text(neighborhood.get_untracked()),
        city: city.get_untracked().trim().to_string(),
        state: opt_text(state.get_untracked()),
        zip_code: opt_text(zip_code.get_untracked()),
        country: country.get_untracked().trim().to_string(),
        contact_phone: opt_text(contact_phone.get_untracked()),
        is_default: is_default.get_untracked(),
        ..original.get_value()
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
                    toast.success("Dirección guardada");
                    on_saved.run(saved);
                }
                Err(e) => {
                    error.set(Some(e.user_message()));
                    toast.api_error("No se pudo guardar la dirección", &e);
                }
            }
            saving.set(false);
        });
    };

    view! {
        <div class="inline-form">
            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}
            <div class="details-grid--3col">
                <FormField label="Alias">
                    <Input value=alias placeholder="Bodega, Matriz..." />
                </FormField>
                <FormField label="Calle" required=true>
                    <Input value=street />
                </FormField>
                <FormField label="No. exterior">
                    <Input value=exterior_number />
                </FormField>
                <FormField label="No. interior">
                    <Input value=interior_number />
                </FormField>
                <FormField label="Colonia">
                    <Input value=neighborhood />
                </FormField>
                <FormField label="Ciudad" required=true>
                    <Input value=city />
                </FormField>
                <FormField label="Estado">
                    <Input value=state />
                </FormField>
                <FormField label="Código postal">
                    <Input value=zip_code placeholder="5 dígitos" />
                </FormField>
                <FormField label="País">
                    <Input value=country />
                </FormField>
                <FormField label="Teléfono de contacto">
                    <Input value=contact_phone placeholder="10 dígitos" />
                </FormField>
            </div>
            <div class="details-flags">
                <Checkbox checked=is_default label="Dirección predeterminada" />
            </div>
            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    size=ButtonSize::Small
                    on_click=handle_save
                    disabled=Signal::derive(move || saving.get())
                >
                    {icon("save")}
                    " Guardar dirección"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    on_click=move |_| on_cancel.run(())
                >
                    " Cancelar"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: i64, is_default: bool) -> CustomerDeliveryAddress {
        CustomerDeliveryAddress {
            id: Some(id),
            customer_id: 5,
            street: format!("Calle {}", id),
            city: "Monterrey".into(),
            is_default,
            ..Default::default()
        }
    }

    #[test]
    fn new_default_clears_the_previous_one() {
        let existing = vec![address(1, true), address(2, false), address(3, false)];
        let stale = defaults_to_clear(&existing, &address(3, true));
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].id, Some(1));
        assert!(!stale[0].is_default);
    }

    #[test]
    fn non_default_save_touches_nothing() {
        let existing = vec![address(1, true)];
        assert!(defaults_to_clear(&existing, &address(2, false)).is_empty());
        assert!(defaults_to_clear(&existing, &address(1, true)).is_empty());
    }
}
