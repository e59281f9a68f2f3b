use std::cmp::Ordering;

use contracts::domain::a016_sale::aggregate::{Sale, SaleStatus};
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a016_sale::api::use_service;
use crate::layout::global_context::use_app_context;
use crate::shared::components::{ListToolbar, RowCheckbox, SelectAllHeader, SortHeader, StatusBadge};
use crate::shared::format::{format_date, format_money, or_dash};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{any_field_matches, compare_f64, compare_text, Searchable, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};

impl Searchable for Sale {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_matches(
            [
                self.folio.as_str(),
                self.customer_name.as_deref().unwrap_or_default(),
                self.status.label(),
                self.payment_method.label(),
            ],
            filter,
        )
    }
}

impl Sortable for Sale {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "folio" => compare_text(&self.folio, &other.folio),
            "customer" => compare_text(
                self.customer_name.as_deref().unwrap_or_default(),
                other.customer_name.as_deref().unwrap_or_default(),
            ),
            "total" => compare_f64(self.total, other.total),
            "balance" => compare_f64(self.balance, other.balance),
            "status" => self.status.label().cmp(other.status.label()),
            _ => self.date.cmp(&other.date),
        }
    }
}

pub fn status_color(status: SaleStatus) -> BadgeColor {
    match status {
        SaleStatus::Pending => BadgeColor::Warning,
        SaleStatus::PartiallyPaid => BadgeColor::Informative,
        SaleStatus::Paid => BadgeColor::Success,
        SaleStatus::Cancelled => BadgeColor::Danger,
    }
}

#[component]
pub fn SaleList() -> impl IntoView {
    let state = ListState::new(use_service(), "date", false);
    let tabs = use_app_context();

    let rows = {
        let state = state.clone();
        Signal::derive(move || state.visible())
    };
    let row_ids =
        Signal::derive(move || rows.get().iter().filter_map(|r| r.id).collect::<Vec<_>>());
    let outstanding = Signal::derive(move || {
        rows.with(|r| {
            r.iter()
                .filter(|s| s.status != SaleStatus::Cancelled)
                .map(|s| s.balance)
                .sum::<f64>()
        })
    });

    state.fetch();

    view! {
        <PageFrame page_id=page_id(&Sale::full_name(), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <ListToolbar
                state=state.clone()
                on_new=Callback::new(move |_| tabs.open_new::<Sale>())
                search_placeholder="Buscar por folio, cliente, estado o forma de pago..."
            />

            <div class="page__content">
                <Table>
                    <TableHeader clone:state>
                        <TableRow>
                            <SelectAllHeader state=state.clone() ids=row_ids />
                            <SortHeader state=state.clone() field="folio" label="Folio" min_width=110.0 />
                            <SortHeader state=state.clone() field="date" label="Fecha" min_width=100.0 />
                            <SortHeader state=state.clone() field="customer" label="Cliente" min_width=220.0 />
                            <TableHeaderCell min_width=110.0>"Forma de pago"</TableHeaderCell>
                            <SortHeader state=state.clone() field="total" label="Total" min_width=110.0 />
                            <SortHeader state=state.clone() field="balance" label="Saldo" min_width=110.0 />
                            <SortHeader state=state.clone() field="status" label="Estado" min_width=110.0 />
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {
                            let state = state.clone();
                            move || rows.get().into_iter().map(|sale| {
                                let state = state.clone();
                                let id = sale.id.unwrap_or_default();
                                let title = sale.display_name();
                                let state_delete = state.clone();
                                let for_delete = sale.clone();
                                view! {
                                    <TableRow>
                                        <RowCheckbox state=state.clone() id=id />
                                        <TableCell>
                                            <a
                                                href="#"
                                                class="table__link"
                                                on:click=move |e| {
                                                    e.prevent_default();
                                                    tabs.open_detail::<Sale>(id, &title);
                                                }
                                            >
                                                {or_dash(Some(sale.folio.as_str()))}
                                            </a>
                                        </TableCell>
                                        <TableCell>{format_date(&sale.date)}</TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                {or_dash(sale.customer_name.as_deref())}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>{sale.payment_method.label()}</TableCell>
                                        <TableCell class="text-right">{format_money(sale.total)}</TableCell>
                                        <TableCell class="text-right">{format_money(sale.balance)}</TableCell>
                                        <TableCell>
                                            <StatusBadge label=sale.status.label() color=status_color(sale.status) />
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
                <Show
                    when=move || rows.with(|r| r.is_empty())
                    fallback=move || view! {
                        <div class="table__footer">
                            "Saldo por cobrar: "
                            <strong>{move || format_money(outstanding.get())}</strong>
                        </div>
                    }
                >
                    <div class="table__empty">"Sin ventas"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a017_payment::aggregate::PaymentMethod;
    use crate::shared::list_utils::{filter_list, sort_list};

    fn sale(folio: &str, balance: f64) -> Sale {
        Sale {
            folio: folio.into(),
            date: "2024-05-05".into(),
            balance,
            ..Default::default()
        }
    }

    #[test]
    fn search_finds_payment_method() {
        let mut by_card = sale("VTA-2", 0.0);
        by_card.payment_method = PaymentMethod::Card;
        let items = vec![sale("VTA-1", 0.0), by_card];
        assert_eq!(filter_list(items, "tarjeta").len(), 1);
    }

    #[test]
    fn largest_balance_first() {
        let mut items = vec![sale("A", 100.0), sale("B", 0.0), sale("C", 950.5)];
        sort_list(&mut items, "balance", false);
        let folios: Vec<_> = items.iter().map(|s| s.folio.as_str()).collect();
        assert_eq!(folios, ["C", "A", "B"]);
    }
}
