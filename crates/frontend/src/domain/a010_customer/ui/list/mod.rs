use std::cmp::Ordering;

use contracts::domain::a010_customer::aggregate::Customer;
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a010_customer::api::use_service;
use crate::domain::a010_customer::ui::details::CustomerDetails;
use crate::shared::components::{
    ActiveBadge, FormDialog, ListToolbar, RowCheckbox, SelectAllHeader, SortHeader,
};
use crate::shared::format::{format_money, or_dash};
use crate::shared::icons::icon;
use crate::shared::list_state::ListState;
use crate::shared::list_utils::{any_field_matches, compare_f64, compare_text, Searchable, Sortable};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::{page_id, PAGE_CAT_LIST};

impl Searchable for Customer {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_matches(
            [
                self.code.as_str(),
                self.business_name.as_str(),
                self.trade_name.as_deref().unwrap_or_default(),
                self.contact_name.as_deref().unwrap_or_default(),
                self.email.as_deref().unwrap_or_default(),
                self.phone.as_deref().unwrap_or_default(),
            ],
            filter,
        )
    }
}

impl Sortable for Customer {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "code" => compare_text(&self.code, &other.code),
            "credit_limit" => compare_f64(self.credit_limit, other.credit_limit),
            "credit_days" => self.credit_days.cmp(&other.credit_days),
            _ => compare_text(&self.business_name, &other.business_name),
        }
    }
}

#[component]
pub fn CustomerList() -> impl IntoView {
    let state = ListState::new(use_service(), "business_name", true);

    let dialog_open = RwSignal::new(false);
    let editing_id = RwSignal::new(None::<i64>);

    let rows = {
        let state = state.clone();
        Signal::derive(move || state.visible())
    };
    let row_ids =
        Signal::derive(move || rows.get().iter().filter_map(|r| r.id).collect::<Vec<_>>());

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
    // A created customer stays open for its sub-resources.
    let on_created = {
        let state = state.clone();
        Callback::new(move |_| state.fetch())
    };
    let on_cancel = Callback::new(move |_| dialog_open.set(false));

    state.fetch();

    view! {
        <PageFrame page_id=page_id(&Customer::full_name(), PAGE_CAT_LIST) category=PAGE_CAT_LIST>
            <ListToolbar
                state=state.clone()
                on_new=Callback::new(move |_| open_dialog(None))
                search_placeholder="Buscar por código, nombre, contacto, correo..."
            />

            <div class="page__content">
                <Table>
                    <TableHeader clone:state>
                        <TableRow>
                            <SelectAllHeader state=state.clone() ids=row_ids />
                            <SortHeader state=state.clone() field="code" label="Código" min_width=90.0 />
                            <SortHeader state=state.clone() field="business_name" label="Razón social" min_width=240.0 />
                            <TableHeaderCell min_width=150.0>"Contacto"</TableHeaderCell>
                            <TableHeaderCell min_width=180.0>"Correo"</TableHeaderCell>
                            <TableHeaderCell min_width=120.0>"Teléfono"</TableHeaderCell>
                            <SortHeader state=state.clone() field="credit_limit" label="Límite de crédito" min_width=130.0 />
                            <SortHeader state=state.clone() field="credit_days" label="Días" min_width=70.0 />
                            <TableHeaderCell min_width=90.0>"Estado"</TableHeaderCell>
                            <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {
                            let state = state.clone();
                            move || rows.get().into_iter().map(|customer| {
                                let state = state.clone();
                                let id = customer.id.unwrap_or_default();
                                let state_delete = state.clone();
                                let for_delete = customer.clone();
                                let trade_name = customer
                                    .trade_name
                                    .clone()
                                    .filter(|t| !t.trim().is_empty());
                                let credit = if customer.has_credit() {
                                    format_money(customer.credit_limit)
                                } else {
                                    "Contado".to_string()
                                };
                                view! {
                                    <TableRow>
                                        <RowCheckbox state=state.clone() id=id />
                                        <TableCell>{or_dash(Some(customer.code.as_str()))}</TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>
                                                <a
                                                    href="#"
                                                    class="table__link"
                                                    on:click=move |e| {
                                                        e.prevent_default();
                                                        open_dialog(Some(id));
                                                    }
                                                >
                                                    {customer.business_name.clone()}
                                                </a>
                                                {trade_name.map(|t| view! { <span class="table__secondary">{t}</span> })}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>{or_dash(customer.contact_name.as_deref())}</TableCell>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{or_dash(customer.email.as_deref())}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>{or_dash(customer.phone.as_deref())}</TableCell>
                                        <TableCell class="text-right">{credit}</TableCell>
                                        <TableCell class="text-right">{customer.credit_days}</TableCell>
                                        <TableCell><ActiveBadge active=customer.is_active /></TableCell>
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
                    <div class="table__empty">"Sin clientes registrados"</div>
                </Show>
            </div>

            <FormDialog
                open=dialog_open
                title=Signal::derive(move || {
                    if editing_id.get().is_some() { "Editar cliente".to_string() } else { "Cliente".to_string() }
                })
            >
                <CustomerDetails
                    id=editing_id.get_untracked()
                    on_saved=on_saved
                    on_created=on_created
                    on_cancel=on_cancel
                />
            </FormDialog>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_utils::{filter_list, sort_list};

    fn customer(code: &str, name: &str, limit: f64) -> Customer {
        Customer {
            code: code.into(),
            business_name: name.into(),
            credit_limit: limit,
            ..Default::default()
        }
    }

    #[test]
    fn search_reaches_contact_fields() {
        let mut with_mail = customer("C-2", "Refaccionaria Ramírez", 0.0);
        with_mail.email = Some("ventas@ramirez.mx".into());
        let items = vec![customer("C-1", "Ópticas del Bajío", 0.0), with_mail];
        assert_eq!(filter_list(items.clone(), "RAMIREZ.mx").len(), 1);
        assert_eq!(filter_list(items.clone(), "opticas").len(), 1);
        assert_eq!(filter_list(items, "c-").len(), 2);
    }

    #[test]
    fn sorts_by_credit_limit() {
        let mut items = vec![
            customer("A", "Uno", 5_000.0),
            customer("B", "Dos", 80_000.0),
            customer("C", "Tres", 0.0),
        ];
        sort_list(&mut items, "credit_limit", false);
        let codes: Vec<_> = items.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["B", "A", "C"]);
    }
}
