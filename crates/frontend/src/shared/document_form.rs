//! Header and lines shared by the quotation, order and sale forms.
//!
//! Each document view model embeds one `DocumentForm` and adds its own
//! fields (validity, delivery, payment method...).

use contracts::domain::a010_customer::aggregate::Customer;
use contracts::domain::common::{DocumentLine, ErpEntity};
use contracts::shared::dates::normalize_iso_date;
use contracts::shared::pricing::{compute_totals, DocumentTotals};
use leptos::prelude::*;
use thaw::*;

use crate::shared::components::form::{id_text, opt_text, parse_id, text_of};
use crate::shared::components::line_items_editor::{lines_of, rows_from, LineRow};
use crate::shared::format::today_iso;

#[derive(Clone, Copy)]
pub struct DocumentForm {
    pub folio: RwSignal<String>,
    pub customer_id: RwSignal<String>,
    pub date: RwSignal<String>,
    pub notes: RwSignal<String>,
    pub rows: RwSignal<Vec<LineRow>>,
    /// Customer catalog of the header select.
    pub customers: RwSignal<Vec<Customer>>,
    pub iva_rate: f64,
}

impl DocumentForm {
    /// Empty form dated today.
    pub fn new(iva_rate: f64) -> Self {
        Self {
            folio: RwSignal::new(String::new()),
            customer_id: RwSignal::new(String::new()),
            date: RwSignal::new(today_iso()),
            notes: RwSignal::new(String::new()),
            rows: RwSignal::new(Vec::new()),
            customers: RwSignal::new(Vec::new()),
            iva_rate,
        }
    }

    /// Loads a stored document. Backend datetimes are cut to the date the
    /// date input expects.
    pub fn fill(
        &self,
        folio: &str,
        customer_id: Option<i64>,
        date: &str,
        notes: &Option<String>,
        items: &[DocumentLine],
    ) {
        self.folio.set(folio.to_string());
        self.customer_id.set(id_text(customer_id));
        self.date.set(normalize_iso_date(date));
        self.notes.set(text_of(notes));
        self.rows.set(rows_from(items));
    }

    /// Live totals of the lines being edited.
    pub fn totals(&self) -> Signal<DocumentTotals> {
        let rows = self.rows;
        let iva_rate = self.iva_rate;
        Signal::derive(move || rows.with(|rows| compute_totals(rows, iva_rate)))
    }

    pub fn selected_customer_id(&self) -> Signal<Option<i64>> {
        let customer_id = self.customer_id;
        Signal::derive(move || parse_id(&customer_id.get()))
    }

    /// The selected customer, when the catalog has it.
    pub fn customer(&self) -> Option<Customer> {
        let id = parse_id(&self.customer_id.get_untracked())?;
        self.customers
            .with_untracked(|list| list.iter().find(|c| c.id == Some(id)).cloned())
    }

    pub fn customer_name(&self) -> Option<String> {
        self.customer().map(|c| c.business_name)
    }

    pub fn folio_value(&self) -> String {
        self.folio.get_untracked().trim().to_string()
    }

    pub fn notes_value(&self) -> Option<String> {
        opt_text(self.notes.get_untracked())
    }

    pub fn lines(&self) -> Vec<DocumentLine> {
        self.rows.with_untracked(|rows| lines_of(rows))
    }
}

/// Customer select of a document header. Inactive customers stay listed
/// only when already chosen.
#[component]
pub fn CustomerSelect(form: DocumentForm, #[prop(into)] disabled: Signal<bool>) -> impl IntoView {
    let customer_id = form.customer_id;
    let customers = form.customers;

    view! {
        <Select value=customer_id disabled=disabled>
            <option value="">"-- Seleccione un cliente --"</option>
            {move || {
                let current = customer_id.get();
                customers
                    .get()
                    .into_iter()
                    .filter_map(|c| {
                        let id = c.id?.to_string();
                        let selected = id == current;
                        (c.is_active || selected).then(|| {
                            view! { <option value=id selected=selected>{c.display_name()}</option> }
                        })
                    })
                    .collect_view()
            }}
        </Select>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::pricing::DEFAULT_IVA_RATE;

    #[test]
    fn header_and_lines_round_through_the_form() {
        let form = DocumentForm::new(DEFAULT_IVA_RATE);
        form.customers.set(vec![Customer {
            id: Some(3),
            business_name: "Constructora Sierra".into(),
            ..Default::default()
        }]);

        let mut line = DocumentLine::for_product(1, "Cemento", 250.0);
        line.quantity = 4.0;
        form.fill("COT-10", Some(3), "2024-05-02", &None, &[line]);

        assert_eq!(form.customer_name().as_deref(), Some("Constructora Sierra"));
        assert_eq!(form.lines()[0].line_total, 1000.0);
        let totals = form.totals().get_untracked();
        assert_eq!(totals.iva, 160.0);
        assert_eq!(totals.total, 1160.0);
        assert_eq!(form.notes_value(), None);
    }

    #[test]
    fn stored_datetime_is_cut_to_the_date() {
        let form = DocumentForm::new(DEFAULT_IVA_RATE);
        form.fill("VTA-3", Some(1), "2024-06-01T00:00:00", &None, &[]);
        assert_eq!(form.date.get_untracked(), "2024-06-01");
    }

    #[test]
    fn unknown_customer_has_no_name() {
        let form = DocumentForm::new(DEFAULT_IVA_RATE);
        form.customer_id.set("9".into());
        assert_eq!(form.customer_name(), None);
        assert_eq!(form.selected_customer_id().get_untracked(), Some(9));
    }
}
