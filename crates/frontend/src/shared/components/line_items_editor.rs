//! Editable line table of quotations, orders and sales.
//!
//! Rows carry a client-side uuid so `<For>` keeps inputs (and focus) stable
//! while quantities and prices change. Every edit recalculates the line; the
//! document totals are derived from the rows by the owning view model.

use std::collections::HashMap;

use contracts::domain::a018_product::aggregate::Product;
use contracts::domain::common::DocumentLine;
use contracts::shared::pricing::{DiscountType, PricedLine};
use leptos::prelude::*;
use thaw::*;
use uuid::Uuid;

use super::form::{amount_text, parse_amount, parse_id};
use crate::shared::format::format_money;
use crate::shared::icons::icon;

#[derive(Debug, Clone, PartialEq)]
pub struct LineRow {
    pub key: Uuid,
    pub line: DocumentLine,
}

impl LineRow {
    pub fn new(line: DocumentLine) -> Self {
        Self {
            key: Uuid::new_v4(),
            line,
        }
    }
}

impl PricedLine for LineRow {
    fn quantity(&self) -> f64 {
        self.line.quantity
    }

    fn unit_price(&self) -> f64 {
        self.line.unit_price
    }

    fn discount(&self) -> f64 {
        self.line.discount
    }

    fn discount_type(&self) -> DiscountType {
        self.line.discount_type
    }

    fn applies_iva(&self) -> bool {
        self.line.applies_iva
    }
}

pub fn rows_from(lines: &[DocumentLine]) -> Vec<LineRow> {
    lines
        .iter()
        .cloned()
        .map(|mut line| {
            line.recalculate();
            LineRow::new(line)
        })
        .collect()
}

pub fn lines_of(rows: &[LineRow]) -> Vec<DocumentLine> {
    rows.iter().map(|row| row.line.clone()).collect()
}

/// Appends a line for `product` at `unit_price` (list or customer price).
pub fn add_product(rows: &mut Vec<LineRow>, product: &Product, unit_price: f64) {
    let Some(product_id) = product.id else {
        return;
    };
    let mut line = DocumentLine::for_product(product_id, product.name.clone(), unit_price);
    line.applies_iva = product.applies_iva;
    line.recalculate();
    rows.push(LineRow::new(line));
}

/// Applies `edit` to the line with `key` and recalculates it.
pub fn update_row(rows: &mut [LineRow], key: Uuid, edit: impl FnOnce(&mut DocumentLine)) {
    if let Some(row) = rows.iter_mut().find(|row| row.key == key) {
        edit(&mut row.line);
        row.line.recalculate();
    }
}

pub fn remove_row(rows: &mut Vec<LineRow>, key: Uuid) {
    rows.retain(|row| row.key != key);
}

/// Price of `product` for the current customer.
pub fn price_for(product: &Product, overrides: &HashMap<i64, f64>) -> f64 {
    product
        .id
        .and_then(|id| overrides.get(&id).copied())
        .unwrap_or(product.unit_price)
}

#[component]
pub fn LineItemsEditor(
    rows: RwSignal<Vec<LineRow>>,
    #[prop(into)] products: Signal<Vec<Product>>,
    /// Customer-specific prices by product id
    #[prop(into)]
    price_overrides: Signal<HashMap<i64, f64>>,
    #[prop(into)] readonly: Signal<bool>,
) -> impl IntoView {
    let picked = RwSignal::new(String::new());

    let add_picked = move |_| {
        let Some(product_id) = parse_id(&picked.get_untracked()) else {
            return;
        };
        let overrides = price_overrides.get_untracked();
        let product = products.with_untracked(|items| {
            items.iter().find(|p| p.id == Some(product_id)).cloned()
        });
        if let Some(product) = product {
            let price = price_for(&product, &overrides);
            rows.update(|rows| add_product(rows, &product, price));
            picked.set(String::new());
        }
    };

    view! {
        <div class="line-items">
            <Show when=move || !readonly.get()>
                <div class="line-items__toolbar">
                    <Select value=picked>
                        <option value="">"-- Agregar producto --"</option>
                        {move || {
                            products
                                .get()
                                .into_iter()
                                .filter(|p| p.is_active)
                                .filter_map(|p| {
                                    p.id.map(|id| {
                                        let label = format!("{} - {} ({})", p.sku, p.name, format_money(p.unit_price));
                                        view! { <option value=id.to_string()>{label}</option> }
                                    })
                                })
                                .collect_view()
                        }}
                    </Select>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=add_picked
                        disabled=Signal::derive(move || picked.get().is_empty())
                    >
                        {icon("plus")}
                        " Agregar"
                    </Button>
                </div>
            </Show>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=220.0>"Producto"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Precio unitario"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Descuento"</TableHeaderCell>
                        <TableHeaderCell min_width=70.0>"Tipo"</TableHeaderCell>
                        <TableHeaderCell min_width=60.0>"IVA"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Importe"</TableHeaderCell>
                        <TableHeaderCell min_width=50.0>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || rows.get()
                        key=|row| row.key
                        children=move |row: LineRow| {
                            let key = row.key;
                            let line = move || {
                                rows.with(|rows| {
                                    rows.iter()
                                        .find(|r| r.key == key)
                                        .map(|r| r.line.clone())
                                        .unwrap_or_default()
                                })
                            };
                            let product_label = row
                                .line
                                .product_name
                                .clone()
                                .unwrap_or_else(|| format!("Producto #{}", row.line.product_id));

                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{product_label}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <input
                                            type="number"
                                            class="form__input form__input--number"
                                            min="0"
                                            step="any"
                                            prop:value=move || amount_text(line().quantity)
                                            prop:disabled=readonly
                                            on:change=move |ev| {
                                                let value = parse_amount(&event_target_value(&ev));
                                                rows.update(|rows| update_row(rows, key, |l| l.quantity = value));
                                            }
                                        />
                                    </TableCell>
                                    <TableCell>
                                        <input
                                            type="number"
                                            class="form__input form__input--number"
                                            min="0"
                                            step="0.01"
                                            prop:value=move || amount_text(line().unit_price)
                                            prop:disabled=readonly
                                            on:change=move |ev| {
                                                let value = parse_amount(&event_target_value(&ev));
                                                rows.update(|rows| update_row(rows, key, |l| l.unit_price = value));
                                            }
                                        />
                                    </TableCell>
                                    <TableCell>
                                        <input
                                            type="number"
                                            class="form__input form__input--number"
                                            min="0"
                                            step="0.01"
                                            prop:value=move || amount_text(line().discount)
                                            prop:disabled=readonly
                                            on:change=move |ev| {
                                                let value = parse_amount(&event_target_value(&ev));
                                                rows.update(|rows| update_row(rows, key, |l| l.discount = value));
                                            }
                                        />
                                    </TableCell>
                                    <TableCell>
                                        <select
                                            class="form__select"
                                            prop:value=move || line().discount_type.as_str()
                                            prop:disabled=readonly
                                            on:change=move |ev| {
                                                let value = DiscountType::parse(&event_target_value(&ev));
                                                rows.update(|rows| update_row(rows, key, |l| l.discount_type = value));
                                            }
                                        >
                                            <option value="percentage">{DiscountType::Percentage.label()}</option>
                                            <option value="amount">{DiscountType::Amount.label()}</option>
                                        </select>
                                    </TableCell>
                                    <TableCell>
                                        <input
                                            type="checkbox"
                                            class="table__checkbox"
                                            prop:checked=move || line().applies_iva
                                            prop:disabled=readonly
                                            on:change=move |ev| {
                                                let value = event_target_checked(&ev);
                                                rows.update(|rows| update_row(rows, key, |l| l.applies_iva = value));
                                            }
                                        />
                                    </TableCell>
                                    <TableCell class="text-right">
                                        {move || format_money(line().line_total)}
                                    </TableCell>
                                    <TableCell>
                                        <Show when=move || !readonly.get()>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| rows.update(|rows| remove_row(rows, key))
                                            >
                                                {icon("delete")}
                                            </Button>
                                        </Show>
                                    </TableCell>
                                </TableRow>
                            }
                        }
                    />
                </TableBody>
            </Table>

            <Show when=move || rows.with(|r| r.is_empty())>
                <div class="line-items__empty">"Sin partidas"</div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::pricing::{compute_totals, DEFAULT_IVA_RATE};

    fn product(id: i64, price: f64, applies_iva: bool) -> Product {
        Product {
            id: Some(id),
            sku: format!("SKU-{}", id),
            name: format!("Producto {}", id),
            unit_price: price,
            applies_iva,
            ..Default::default()
        }
    }

    #[test]
    fn edits_recalculate_line_and_totals() {
        let mut rows = Vec::new();
        add_product(&mut rows, &product(1, 100.0, true), 100.0);
        add_product(&mut rows, &product(2, 50.0, false), 50.0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].line.applies_iva, false);

        let key = rows[0].key;
        update_row(&mut rows, key, |l| {
            l.quantity = 3.0;
            l.discount = 10.0;
        });
        assert_eq!(rows[0].line.line_total, 270.0);

        let totals = compute_totals(&rows, DEFAULT_IVA_RATE);
        assert_eq!(totals.subtotal, 350.0);
        assert_eq!(totals.discount, 30.0);
        assert_eq!(totals.iva, 43.2);
        assert_eq!(totals.total, 363.2);

        remove_row(&mut rows, key);
        assert_eq!(lines_of(&rows).len(), 1);
    }

    #[test]
    fn unsaved_products_are_not_added() {
        let mut rows = Vec::new();
        let mut draft = product(1, 10.0, true);
        draft.id = None;
        add_product(&mut rows, &draft, 10.0);
        assert!(rows.is_empty());
    }

    #[test]
    fn customer_price_overrides_list_price() {
        let overrides = HashMap::from([(1, 80.0)]);
        assert_eq!(price_for(&product(1, 100.0, true), &overrides), 80.0);
        assert_eq!(price_for(&product(2, 100.0, true), &overrides), 100.0);
    }

    #[test]
    fn loaded_lines_get_fresh_keys_and_totals() {
        let mut stale = DocumentLine::for_product(4, "Cable", 10.0);
        stale.quantity = 2.0;
        stale.line_total = 0.0;
        let rows = rows_from(&[stale.clone(), stale]);
        assert_ne!(rows[0].key, rows[1].key);
        assert_eq!(rows[0].line.line_total, 20.0);
    }
}
