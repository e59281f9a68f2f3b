//! Every payment received, across sales. Payments are registered from the
//! sale itself; this list only reviews and deletes them.

use std::cmp::Ordering;
use std::collections::HashMap;

use contracts::domain::a016_sale::aggregate::Sale;
use contracts::domain::a017_payment::aggregate::Payment;
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a016_sale::api::use_service as use_sale_service;
use crate::domain::a017_payment::api::use_service;
use crate::layout::global_context::use_app_context;
use crate::shared::components::{ListToolbar, RowCheckbox, SelectAllHeader, SortHeader};
use crate::shared::format::{format_date, format_money, or_dash};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{any_field_matches, compare_f64, Searchable, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};
use crate::shared::toast::use_toast;

impl Searchable for Payment {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_matches(
            [
                self.payment_method.label(),
                self.reference.as_deref().unwrap_or_default(),
                self.notes.as_deref().unwrap_or_default(),
                self.payment_date.as_str(),
            ],
            filter,
        )
    }
}

impl Sortable for Payment {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "amount" => compare_f64(self.amount, other.amount),
            "method" => self.payment_method.label().cmp(other.payment_method.label()),
            "sale" => self.sale_id.cmp(&other.sale_id),
            _ => self.payment_date.cmp(&other.payment_date),
        }
    }
}

/// Sale folio by id, for the payment rows.
pub fn sale_folios(sales: &[Sale]) -> HashMap<i64, String> {
    sales
        .iter()
        .filter_map(|s| Some((s.id?, s.display_name())))
        .collect()
}

#[component]
pub fn PaymentList() -> impl IntoView {
    let state = ListState::new(use_service(), "payment_date", false);
    let tabs = use_app_context();
    let toast = use_toast();
    let sales_service = use_sale_service();

    let folios = RwSignal::new(HashMap::<i64, String>::new());
    spawn_local(async move {
        match sales_service.get_all().await {
            Ok(sales) => folios.set(sale_folios(&sales)),
            Err(e) => toast.api_error("No se pudieron cargar las ventas", &e),
        }
    });

    let rows = {
        let state = state.clone();
        Signal::derive(move || state.visible())
    };
    let row_ids =
        Signal::derive(move || rows.get().iter().filter_map(|r| r.id).collect::<Vec<_>>());
    let total = Signal::derive(move || {
        rows.with(|r| r.iter().filter(|p| p.is_active).map(|p| p.amount).sum::<f64>())
    });

    state.fetch();

    view! {
        <PageFrame page_id=page_id(&Payment::full_name(), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <ListToolbar state=state.clone() search_placeholder="Buscar por forma de pago, referencia o fecha..." />

            <div class="page__content">
                <Table>
                    <TableHeader clone:state>
                        <TableRow>
                            <SelectAllHeader state=state.clone() ids=row_ids />
                            <SortHeader state=state.clone() field="payment_date" label="Fecha" min_width=100.0 />
                            <SortHeader state=state.clone() field="sale" label="Venta" min_width=140.0 />
                            <SortHeader state=state.clone() field="method" label="Forma de pago" min_width=120.0 />
                            <TableHeaderCell min_width=140.0>"Referencia"</TableHeaderCell>
                            <SortHeader state=state.clone() field="amount" label="Monto" min_width=110.0 />
                            <TableHeaderCell min_width=160.0>"Notas"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {
                            let state = state.clone();
                            move || rows.get().into_iter().map(|payment| {
                                let state = state.clone();
                                let id = payment.id.unwrap_or_default();
                                let sale_id = payment.sale_id;
                                let sale_title = folios
                                    .with(|f| f.get(&sale_id).cloned())
                                    .unwrap_or_else(|| format!("{} #{}", Sale::element_name(), sale_id));
                                let link_title = sale_title.clone();
                                let state_delete = state.clone();
                                let for_delete = payment.clone();
                                view! {
                                    <TableRow>
                                        <RowCheckbox state=state.clone() id=id />
                                        <TableCell>{format_date(&payment.payment_date)}</TableCell>
                                        <TableCell>
                                            <a
                                                href="#"
                                                class="table__link"
                                                on:click=move |e| {
                                                    e.prevent_default();
                                                    tabs.open_detail::<Sale>(sale_id, &link_title);
                                                }
                                            >
                                                {sale_title}
                                            </a>
                                        </TableCell>
                                        <TableCell>{payment.payment_method.label()}</TableCell>
                                        <TableCell>{or_dash(payment.reference.as_deref())}</TableCell>
                                        <TableCell class="text-right">{format_money(payment.amount)}</TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{or_dash(payment.notes.as_deref())}</TableCellLayout>
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
                            "Total cobrado: "
                            <strong>{move || format_money(total.get())}</strong>
                        </div>
                    }
                >
                    <div class="table__empty">"Sin pagos registrados"</div>
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

    #[test]
    fn search_reaches_bank_reference() {
        let mut transfer = Payment::for_sale(1, "2024-02-01", 500.0);
        transfer.payment_method = PaymentMethod::Transfer;
        transfer.reference = Some("SPEI-998877".into());
        let items = vec![Payment::for_sale(2, "2024-02-02", 100.0), transfer];
        assert_eq!(filter_list(items.clone(), "spei").len(), 1);
        assert_eq!(filter_list(items, "efectivo").len(), 1);
    }

    #[test]
    fn sorts_by_amount() {
        let mut items = vec![
            Payment::for_sale(1, "2024-02-01", 20.0),
            Payment::for_sale(1, "2024-02-02", 700.0),
            Payment::for_sale(1, "2024-02-03", 150.0),
        ];
        sort_list(&mut items, "amount", false);
        let amounts: Vec<_> = items.iter().map(|p| p.amount).collect();
        assert_eq!(amounts, [700.0, 150.0, 20.0]);
    }

    #[test]
    fn folios_skip_unsaved_sales() {
        let sales = vec![
            Sale { id: Some(4), folio: "VTA-0004".into(), ..Default::default() },
            Sale { folio: "VTA-X".into(), ..Default::default() },
        ];
        let folios = sale_folios(&sales);
        assert_eq!(folios.len(), 1);
        assert_eq!(folios[&4], "Venta VTA-0004");
    }
}
