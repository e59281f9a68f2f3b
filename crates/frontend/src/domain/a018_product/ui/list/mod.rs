use std::cmp::Ordering;

use contracts::domain::a018_product::aggregate::Product;
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a018_product::api::use_service;
use crate::domain::a018_product::ui::details::ProductDetails;
use crate::shared::components::{
    ActiveBadge, FormDialog, ListToolbar, RowCheckbox, SelectAllHeader, SortHeader,
};
use crate::shared::format::{format_money, format_percent, format_quantity};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{any_field_matches, compare_f64, compare_text, Searchable, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};

impl Searchable for Product {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_matches(
            [
                self.sku.as_str(),
                self.name.as_str(),
                self.description.as_deref().unwrap_or_default(),
            ],
            filter,
        )
    }
}

impl Sortable for Product {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "sku" => compare_text(&self.sku, &other.sku),
            "unit_price" => compare_f64(self.unit_price, other.unit_price),
            "stock" => compare_f64(self.stock, other.stock),
            "margin" => compare_f64(
                self.margin().unwrap_or(f64::MIN),
                other.margin().unwrap_or(f64::MIN),
            ),
            _ => compare_text(&self.name, &other.name),
        }
    }
}

/// Count of active products below their minimum stock.
pub fn low_stock_count(products: &[Product]) -> usize {
    products
        .iter()
        .filter(|p| p.is_active && p.is_below_min_stock())
        .count()
}

#[component]
pub fn ProductList() -> impl IntoView {
    let state = ListState::new(use_service(), "name", true);
    let dialog_open = RwSignal::new(false);
    let editing_id = RwSignal::new(None::<i64>);

    let rows = {
        let state = state.clone();
        Signal::derive(move || state.visible())
    };
    let row_ids =
        Signal::derive(move || rows.get().iter().filter_map(|r| r.id).collect::<Vec<_>>());
    let items = state.items;

    let open_dialog = move |id: Option<i64>| {
        editing_id.set(id);
        dialog_open.set(true);
    };
    let on_saved = {
        let state = state.clone();
        Callback::new(move |_| {
            dialog_open.set(false);
            state.fetch();
        })
    };
    let on_cancel = Callback::new(move |_| dialog_open.set(false));

    state.fetch();

    view! {
        <PageFrame page_id=page_id(&Product::full_name(), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <ListToolbar
                state=state.clone()
                on_new=Callback::new(move |_| open_dialog(None))
                search_placeholder="Buscar por SKU, nombre o descripción..."
            />

            {move || {
                let low = items.with(|p| low_stock_count(p));
                (low > 0).then(|| view! {
                    <div class="warning-box">
                        <span class="warning-box__icon">{icon("alert")}</span>
                        <span class="warning-box__text">
                            {format!("{} productos por debajo del stock mínimo", low)}
                        </span>
                    </div>
                })
            }}

            <div class="page__content">
                <Table>
                    <TableHeader clone:state>
                        <TableRow>
                            <SelectAllHeader state=state.clone() ids=row_ids />
                            <SortHeader state=state.clone() field="sku" label="SKU" min_width=110.0 />
                            <SortHeader state=state.clone() field="name" label="Nombre" min_width=220.0 />
                            <TableHeaderCell min_width=70.0>"Unidad"</TableHeaderCell>
                            <SortHeader state=state.clone() field="unit_price" label="Precio" min_width=100.0 />
                            <TableHeaderCell min_width=100.0>"Costo"</TableHeaderCell>
                            <SortHeader state=state.clone() field="margin" label="Margen" min_width=90.0 />
                            <SortHeader state=state.clone() field="stock" label="Existencia" min_width=130.0 />
                            <TableHeaderCell min_width=90.0>"Estado"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {
                            let state = state.clone();
                            move || rows.get().into_iter().map(|product| {
                                let state = state.clone();
                                let id = product.id.unwrap_or_default();
                                let state_delete = state.clone();
                                let for_delete = product.clone();
                                let margin = product.margin().map(format_percent).unwrap_or_else(|| "-".into());
                                let low_stock = product.is_below_min_stock();
                                view! {
                                    <TableRow>
                                        <RowCheckbox state=state.clone() id=id />
                                        <TableCell>
                                            <TableCellLayout>
                                                <a
                                                    href="#"
                                                    class="table__link"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        open_dialog(Some(id));
                                                    }
                                                >
                                                    {product.sku.clone()}
                                                </a>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{product.name.clone()}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>{product.unit.clone()}</TableCell>
                                        <TableCell class="text-right">{format_money(product.unit_price)}</TableCell>
                                        <TableCell class="text-right">{format_money(product.cost)}</TableCell>
                                        <TableCell class="text-right">{margin}</TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {format_quantity(product.stock)}
                                                {low_stock.then(|| view! {
                                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>
                                                        "Bajo mínimo"
                                                    </Badge>
                                                })}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell><ActiveBadge active=product.is_active /></TableCell>
                                        <TableCell>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                attr:title="Eliminar"
                                                on_click=move |_| state_delete.delete_one(&for_delete)
                                            >
                                                {icon("delete")}
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()
                        }
                    </TableBody>
                </Table>
                <Show when=move || rows.with(|r| r.is_empty())>
                    <div class="table__empty">"Sin productos"</div>
                </Show>
            </div>

            <FormDialog
                open=dialog_open
                title=Signal::derive(move || {
                    if editing_id.get().is_some() { "Editar producto".to_string() } else { "Nuevo producto".to_string() }
                })
            >
                <ProductDetails id=editing_id.get_untracked() on_saved=on_saved on_cancel=on_cancel />
            </FormDialog>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::{filter_list, sort_list};

    fn product(sku: &str, name: &str, price: f64, stock: f64, min_stock: f64) -> Product {
        Product {
            id: Some(1),
            sku: sku.into(),
            name: name.into(),
            unit_price: price,
            cost: price / 2.0,
            stock,
            min_stock,
            ..Default::default()
        }
    }

    #[test]
    fn search_covers_sku_and_accents() {
        let items = vec![
            product("CAB-01", "Cable eléctrico", 10.0, 5.0, 0.0),
            product("TOR-02", "Tornillo", 1.0, 500.0, 0.0),
        ];
        assert_eq!(filter_list(items.clone(), "electrico").len(), 1);
        assert_eq!(filter_list(items.clone(), "tor-").len(), 1);
        assert_eq!(filter_list(items, "x").len(), 2);
    }

    #[test]
    fn sorts_by_price_descending() {
        let mut items = vec![
            product("A", "A", 10.0, 0.0, 0.0),
            product("B", "B", 30.0, 0.0, 0.0),
            product("C", "C", 20.0, 0.0, 0.0),
        ];
        sort_list(&mut items, "unit_price", false);
        let skus: Vec<_> = items.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, ["B", "C", "A"]);
    }

    #[test]
    fn counts_only_active_low_stock() {
        let mut inactive = product("C", "C", 1.0, 1.0, 10.0);
        inactive.is_active = false;
        let items = vec![
            product("A", "A", 1.0, 2.0, 10.0),
            product("B", "B", 1.0, 20.0, 10.0),
            inactive,
        ];
        assert_eq!(low_stock_count(&items), 1);
    }
}
