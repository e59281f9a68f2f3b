use std::cmp::Ordering;

use contracts::domain::a014_quotation::aggregate::{Quotation, QuotationStatus};
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a014_quotation::api::use_service;
use crate::layout::global_context::use_app_context;
use crate::shared::components::{ListToolbar, RowCheckbox, SelectAllHeader, SortHeader, StatusBadge};
use crate::shared::format::{format_date, format_money, or_dash, today_iso};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{any_field_matches, compare_f64, compare_text, Searchable, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};

impl Searchable for Quotation {
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

impl Sortable for Quotation {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "folio" => compare_text(&self.folio, &other.folio),
            "customer" => compare_text(
                self.customer_name.as_deref().unwrap_or_default(),
                other.customer_name.as_deref().unwrap_or_default(),
            ),
            "valid_until" => self.valid_until.cmp(&other.valid_until),
            "total" => compare_f64(self.total, other.total),
            "status" => self.status.label().cmp(other.status.label()),
            _ => self.date.cmp(&other.date),
        }
    }
}

pub fn status_color(status: QuotationStatus) -> BadgeColor {
    match status {
        QuotationStatus::Draft => BadgeColor::Subtle,
        QuotationStatus::Sent => BadgeColor::Informative,
        QuotationStatus::Accepted => BadgeColor::Success,
        QuotationStatus::Rejected => BadgeColor::Danger,
        QuotationStatus::Expired => BadgeColor::Warning,
    }
}

#[component]
pub fn QuotationList() -> impl IntoView {
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
        <PageFrame page_id=page_id(&Quotation::full_name(), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <ListToolbar
                state=state.clone()
                on_new=Callback::new(move |_| tabs.open_new::<Quotation>())
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
                            <SortHeader state=state.clone() field="valid_until" label="Vigencia" min_width=100.0 />
                            <SortHeader state=state.clone() field="total" label="Total" min_width=120.0 />
                            <SortHeader state=state.clone() field="status" label="Estado" min_width=110.0 />
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {
                            let state = state.clone();
                            move || {
                                let today = today_iso();
                                rows.get().into_iter().map(|quotation| {
                                    let state = state.clone();
                                    let id = quotation.id.unwrap_or_default();
                                    let title = quotation.display_name();
                                    let expired = quotation.is_expired(&today);
                                    let state_delete = state.clone();
                                    let for_delete = quotation.clone();
                                    view! {
                                        <TableRow>
                                            <RowCheckbox state=state.clone() id=id />
                                            <TableCell>
                                                <a
                                                    href="#"
                                                    class="table__link"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        tabs.open_detail::<Quotation>(id, &title);
                                                    }
                                                >
                                                    {or_dash(Some(quotation.folio.as_str()))}
                                                </a>
                                            </TableCell>
                                            <TableCell>{format_date(&quotation.date)}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {or_dash(quotation.customer_name.as_deref())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell class=if expired { "text-danger" } else { "" }>
                                                {quotation.valid_until.as_deref().map(format_date).unwrap_or_else(|| "-".into())}
                                            </TableCell>
                                            <TableCell class="text-right">{format_money(quotation.total)}</TableCell>
                                            <TableCell>
                                                <StatusBadge
                                                    label=quotation.status.label()
                                                    color=status_color(quotation.status)
                                                />
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
                        }
                    </TableBody>
                </Table>
                <Show when=move || rows.with(|r| r.is_empty())>
                    <div class="table__empty">"Sin cotizaciones"</div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::{filter_list, sort_list};

    fn quotation(folio: &str, customer: &str, date: &str, total: f64) -> Quotation {
        Quotation {
            folio: folio.into(),
            customer_name: Some(customer.into()),
            date: date.into(),
            total,
            ..Default::default()
        }
    }

    #[test]
    fn search_covers_folio_customer_and_status() {
        let mut sent = quotation("COT-0002", "Ferretería León", "2024-03-02", 100.0);
        sent.status = QuotationStatus::Sent;
        let items = vec![quotation("COT-0001", "Aceros Monterrey", "2024-03-01", 50.0), sent];

        assert_eq!(filter_list(items.clone(), "ferreteria").len(), 1);
        assert_eq!(filter_list(items.clone(), "enviada").len(), 1);
        assert_eq!(filter_list(items, "cot-000").len(), 2);
    }

    #[test]
    fn newest_first_by_default_field() {
        let mut items = vec![
            quotation("A", "x", "2024-01-10", 0.0),
            quotation("B", "x", "2024-03-01", 0.0),
            quotation("C", "x", "2023-12-31", 0.0),
        ];
        sort_list(&mut items, "date", false);
        let folios: Vec<_> = items.iter().map(|q| q.folio.as_str()).collect();
        assert_eq!(folios, ["B", "A", "C"]);
    }
}
