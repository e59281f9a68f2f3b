//! Products as known by one customer: their own SKU and negotiated price.

use std::collections::HashMap;

use contracts::domain::a013_customer_product::aggregate::CustomerProduct;
use contracts::domain::a018_product::aggregate::Product;
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api::{use_service, CustomerProductService};
use crate::domain::a018_product::api::use_product_catalog;
use crate::shared::components::form::{opt_text, parse_id, parse_optional_amount};
use crate::shared::components::{ErrorBox, FormField};
use crate::shared::format::{format_money, or_dash};
use crate::shared::icons::icon;
use crate::shared::list_state::confirm;
use crate::shared::toast::{use_toast, ToastService};

/// Negotiated prices by product id, for pricing new document lines.
pub fn special_prices(items: &[CustomerProduct], products: &[Product]) -> HashMap<i64, f64> {
    items
        .iter()
        .filter(|cp| cp.is_active && cp.special_price.is_some())
        .map(|cp| {
            let list_price = products
                .iter()
                .find(|p| p.id == Some(cp.product_id))
                .map(|p| p.unit_price)
                .unwrap_or_default();
            (cp.product_id, cp.effective_price(list_price))
        })
        .collect()
}

/// Loads the customer's products; an unknown customer (404) has none.
pub fn load_customer_products(
    service: CustomerProductService,
    toast: ToastService,
    customer_id: i64,
    items: RwSignal<Vec<CustomerProduct>>,
) {
    spawn_local(async move {
        match service.get_by_customer(customer_id).await {
            Ok(list) => items.set(list),
            Err(e) => toast.api_error("No se pudieron cargar los productos del cliente", &e),
        }
    });
}

/// Negotiated prices of whichever customer is selected in a document form.
pub fn use_special_prices(
    customer_id: Signal<Option<i64>>,
    products: RwSignal<Vec<Product>>,
) -> Signal<HashMap<i64, f64>> {
    let service = use_service();
    let toast = use_toast();
    let items = RwSignal::new(Vec::<CustomerProduct>::new());

    Effect::new(move |_| match customer_id.get() {
        Some(id) => load_customer_products(service.clone(), toast, id, items),
        None => items.set(Vec::new()),
    });

    Signal::derive(move || products.with(|p| items.with(|i| special_prices(i, p))))
}

#[component]
pub fn CustomerProductsPanel(customer_id: i64) -> impl IntoView {
    let service = use_service();
    let toast = use_toast();
    let products = use_product_catalog();
    let items = RwSignal::new(Vec::<CustomerProduct>::new());

    let reload = {
        let service = service.clone();
        move || load_customer_products(service.clone(), toast, customer_id, items)
    };
    reload();

    let product_id = RwSignal::new(String::new());
    let customer_sku = RwSignal::new(String::new());
    let special_price = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let handle_add = {
        let service = service.clone();
        let reload = reload.clone();
        move |_| {
            let pid = parse_id(&product_id.get_untracked()).unwrap_or_default();
            let product_name = products.with_untracked(|list| {
                list.iter().find(|p| p.id == Some(pid)).map(|p| p.name.clone())
            });
            let record = CustomerProduct {
                product_id: pid,
                product_name,
                customer_sku: opt_text(customer_sku.get_untracked()),
                special_price: parse_optional_amount(&special_price.get_untracked()),
                notes: opt_text(notes.get_untracked()),
                ..CustomerProduct::for_customer(customer_id)
            };
            if let Err(msg) = record.validate() {
                error.set(Some(msg));
                return;
            }
            if items.with_untracked(|list| list.iter().any(|cp| cp.product_id == pid)) {
                error.set(Some("El producto ya está asignado a este cliente".into()));
                return;
            }
            error.set(None);
            saving.set(true);
            let service = service.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match service.create(&record).await {
                    Ok(_) => {
                        toast.success("Producto asignado al cliente");
                        product_id.set(String::new());
                        customer_sku.set(String::new());
                        special_price.set(String::new());
                        notes.set(String::new());
                        reload();
                    }
                    Err(e) => {
                        error.set(Some(e.user_message()));
                        toast.api_error("No se pudo asignar el producto", &e);
                    }
                }
                saving.set(false);
            });
        }
    };

    let delete = {
        let service = service.clone();
        move |item: CustomerProduct| {
            let Some(id) = item.id else {
                return;
            };
            let question = format!(
                "¿Quitar \"{}\" de los productos del cliente?",
                item.display_name()
            );
            if !confirm(&question) {
                return;
            }
            let service = service.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match service.delete(id).await {
                    Ok(()) => {
                        toast.success("Producto retirado del cliente");
                        reload();
                    }
                    Err(e) => toast.api_error("No se pudo retirar el producto", &e),
                }
            });
        }
    };

    let list_price = move |pid: i64| {
        products.with(|list| list.iter().find(|p| p.id == Some(pid)).map(|p| p.unit_price))
    };

    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Productos del cliente"</h4>
            {move || error.get().map(|e| view! { <ErrorBox message=e /> })}

            <div class="details-grid--3col">
                <FormField label="Producto" required=true>
                    <Select value=product_id>
                        <option value="">"-- Seleccione --"</option>
                        {move || products.get().into_iter().filter(|p| p.is_active).filter_map(|p| {
                            p.id.map(|id| view! { <option value=id.to_string()>{p.display_name()}</option> })
                        }).collect_view()}
                    </Select>
                </FormField>
                <FormField label="SKU del cliente">
                    <Input value=customer_sku />
                </FormField>
                <FormField label="Precio especial">
                    <Input value=special_price input_type=InputType::Number placeholder="Precio de lista" />
                </FormField>
                <FormField label="Notas" wide=true>
                    <Input value=notes />
                </FormField>
            </div>
            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    on_click=handle_add
                    disabled=Signal::derive(move || saving.get() || product_id.get().is_empty())
                >
                    {icon("plus")}
                    " Asignar producto"
                </Button>
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=220.0>"Producto"</TableHeaderCell>
                        <TableHeaderCell min_width=120.0>"SKU cliente"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Precio lista"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Precio especial"</TableHeaderCell>
                        <TableHeaderCell min_width=180.0>"Notas"</TableHeaderCell>
                        <TableHeaderCell min_width=50.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let delete = delete.clone();
                        items.get().into_iter().map(|item| {
                            let delete = delete.clone();
                            let for_delete = item.clone();
                            let list = list_price(item.product_id).map(format_money);
                            let special = item.special_price.map(format_money);
                            view! {
                                <TableRow>
                                    <TableCell clone:item>
                                        <TableCellLayout truncate=true>{item.display_name()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>{or_dash(item.customer_sku.as_deref())}</TableCell>
                                    <TableCell class="text-right">{or_dash(list.as_deref())}</TableCell>
                                    <TableCell class="text-right">{or_dash(special.as_deref())}</TableCell>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{or_dash(item.notes.as_deref())}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            attr:title="Quitar"
                                            on_click=move |_| delete(for_delete.clone())
                                        >
                                            {icon("delete")}
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()
                    }}
                </TableBody>
            </Table>
            <Show when=move || items.with(|i| i.is_empty())>
                <div class="table__empty">"Sin productos asignados"</div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id: Some(id),
            sku: format!("P{}", id),
            name: format!("Producto {}", id),
            unit_price: price,
            ..Default::default()
        }
    }

    fn assigned(product_id: i64, special_price: Option<f64>) -> CustomerProduct {
        CustomerProduct {
            product_id,
            special_price,
            ..CustomerProduct::for_customer(9)
        }
    }

    #[test]
    fn only_negotiated_prices_override() {
        let products = vec![product(1, 100.0), product(2, 50.0)];
        let items = vec![assigned(1, Some(85.0)), assigned(2, None)];
        let prices = special_prices(&items, &products);
        assert_eq!(prices.get(&1), Some(&85.0));
        assert_eq!(prices.get(&2), None);
    }

    #[test]
    fn inactive_assignments_are_ignored() {
        let mut item = assigned(1, Some(10.0));
        item.is_active = false;
        assert!(special_prices(&[item], &[product(1, 100.0)]).is_empty());
    }
}
