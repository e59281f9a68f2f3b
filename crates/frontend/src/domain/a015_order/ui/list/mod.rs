use std::cmp::Ordering;

use contracts::domain::a015_order::aggregate::{Order, OrderStatus};
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a015_order::api::use_service;
use crate::layout::global_context::use_app_context;
use crate::shared::components::{ListToolbar, RowCheckbox, SelectAllHeader, SortHeader, StatusBadge};
use crate::shared::format::{format_date, format_money, or_dash};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{any_field_matches, compare_f64, compare_text, Searchable, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};

impl Searchable for Order {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_matches(
            [
                self.folio.as_str(),
                self.customer_name.as_deref().unwrap_or_default(),
                self.status.label(),
                self.notes.as_deref().unwrap_or_default(),
            ],
            filter,
        )
    }
}

impl Sortable for Order {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "folio" => compare_text(&self.folio, &other.folio),
            "customer" => compare_text(
                self.customer_name.as_deref().unwrap_or_default(),
                other.customer_name.as_deref().unwrap_or_default(),
            ),
            "delivery_date" => self.delivery_date.cmp(&other.delivery_date),
            "total" => compare_f64(self.total, other.total),
            "status" => self.status.label().cmp(other.status.label()),
            _ => self.date.cmp(&other.date),
        }
    }
}

pub fn status_color(status: OrderStatus) -> BadgeColor {
    match status {
        OrderStatus::Pending => BadgeColor::Warning,
        OrderStatus::Confirmed => BadgeColor::Informative,
        OrderStatus::Shipped => BadgeColor::Brand,
        OrderStatus::Delivered => BadgeColor::Success,
        OrderStatus::Cancelled => BadgeColor::Danger,
    }
}

#[component]
pub fn OrderList() -> impl IntoView {
    let state = ListState::new(use_service(), "date", false);
    let tabs = use_app_context();

    let rows = {
        let state = state.clone();
        Signal::derive(move || state.visible())
    };
    let row_ids =
        Signal::derive(move || rows.get().iter().filter_map(|r| r.id).collect::<Vec<_>>());

    state.fetch();

    view! {
        <PageFrame page_id=page_id(&Order::full_name(), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <ListToolbar
                state=state.clone()
                on_new=Callback::new(move |_| tabs.open_new::<Order>())
                search_placeholder="Buscar por folio, cliente o estado..."
            />

            <div class="page__content">
                <Table>
                    <TableHeader clone:state>
                        <TableRow>
                            <SelectAllHeader state=state.clone() ids=row_ids />
                            <SortHeader state=state.clone() field="folio" label="Folio" min_width=110.0 />
                            <SortHeader state=state.clone() field="date" label="Fecha" min_width=100.0 />
                            <SortHeader state=state.clone() field="customer" label="Cliente" min_width=220.0 />
                            <SortHeader state=state.clone() field="delivery_date" label="Entrega" min_width=100.0 />
                            <SortHeader state=state.clone() field="total" label="Total" min_width=120.0 />
                            <SortHeader state=state.clone() field="status" label="Estado" min_width=110.0 />
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {
                            let state = state.clone();
                            move || rows.get().into_iter().map(|order| {
                                let state = state.clone();
                                let id = order.id.unwrap_or_default();
                                let title = order.display_name();
                                let state_delete = state.clone();
                                let for_delete = order.clone();
                                view! {
                                    <TableRow>
                                        <RowCheckbox state=state.clone() id=id />
                                        <TableCell>
                                            <a
                                                href="#"
                                                class="table__link"
                                                on:click=move |e| {
                                                    e.prevent_default();
                                                    tabs.open_detail::<Order>(id, &title);
                                                }
                                            >
                                                {or_dash(Some(order.folio.as_str()))}
                                            </a>
                                        </TableCell>
                                        <TableCell>{format_date(&order.date)}</TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {or_dash(order.customer_name.as_deref())}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            {order.delivery_date.as_deref().map(format_date).unwrap_or_else(|| "-".into())}
                                        </TableCell>
                                        <TableCell class="text-right">{format_money(order.total)}</TableCell>
                                        <TableCell>
                                            <StatusBadge label=order.status.label() color=status_color(order.status) />
                                        </TableCell>
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
                    <div class="table__empty">"Sin pedidos"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::{filter_list, sort_list};

    fn order(folio: &str, delivery: Option<&str>, total: f64) -> Order {
        Order {
            folio: folio.into(),
            date: "2024-06-01".into(),
            delivery_date: delivery.map(str::to_string),
            total,
            ..Default::default()
        }
    }

    #[test]
    fn search_finds_status_label() {
        let mut shipped = order("PED-2", None, 0.0);
        shipped.status = OrderStatus::Shipped;
        let items = vec![order("PED-1", None, 0.0), shipped];
        assert_eq!(filter_list(items, "enviado").len(), 1);
    }

    #[test]
    fn undated_deliveries_sort_first_ascending() {
        let mut items = vec![
            order("A", Some("2024-07-01"), 0.0),
            order("B", None, 0.0),
            order("C", Some("2024-06-15"), 0.0),
        ];
        sort_list(&mut items, "delivery_date", true);
        let folios: Vec<_> = items.iter().map(|o| o.folio.as_str()).collect();
        assert_eq!(folios, ["B", "C", "A"]);
    }

    #[test]
    fn sorts_by_total_descending() {
        let mut items = vec![
            order("A", None, 10.0),
            order("B", None, 300.0),
            order("C", None, 25.5),
        ];
        sort_list(&mut items, "total", false);
        let folios: Vec<_> = items.iter().map(|o| o.folio.as_str()).collect();
        assert_eq!(folios, ["B", "C", "A"]);
    }
}
