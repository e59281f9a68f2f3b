use contracts::domain::a014_quotation::aggregate::{Quotation, QuotationStatus};
use contracts::domain::a015_order::aggregate::Order;
use contracts::domain::common::{CommercialDocument, ErpEntity};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model;
use crate::config::AppConfig;
use crate::domain::a014_quotation::api::QuotationService;
use crate::domain::a015_order::api::OrderService;
use crate::layout::global_context::{new_key, AppGlobalContext};
use crate::shared::api::CrudService;
use crate::shared::components::form::{date_text_of, opt_text, parse_id};
use crate::shared::document_form::DocumentForm;
use crate::shared::format::today_iso;
use crate::shared::toast::ToastService;

#[derive(Clone)]
pub struct QuotationDetailsVm {
    service: QuotationService,
    orders: OrderService,
    toast: ToastService,
    tabs: AppGlobalContext,
    original: RwSignal<Quotation>,

    pub id: RwSignal<Option<i64>>,
    pub doc: DocumentForm,
    pub valid_until: RwSignal<String>,
    pub status: RwSignal<String>,
    /// Order created from this quotation
    pub linked_order: RwSignal<Option<Order>>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub converting: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl QuotationDetailsVm {
    pub fn new(config: &AppConfig, toast: ToastService, tabs: AppGlobalContext) -> Self {
        Self {
            service: CrudService::new(config),
            orders: CrudService::new(config),
            toast,
            tabs,
            original: RwSignal::new(Quotation::default()),
            id: RwSignal::new(None),
            doc: DocumentForm::new(config.iva_rate),
            valid_until: RwSignal::new(String::new()),
            status: RwSignal::new(QuotationStatus::Draft.as_str().to_string()),
            linked_order: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            converting: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    /// Accepted, rejected and expired quotations keep their lines.
    pub fn is_readonly(&self) -> Signal<bool> {
        let status = self.status;
        Signal::derive(move || !QuotationStatus::parse(&status.get()).is_editable())
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let saving = self.saving;
        let loading = self.loading;
        let converting = self.converting;
        let customer = self.doc.customer_id;
        Signal::derive(move || {
            saving.get() || loading.get() || converting.get() || customer.get().is_empty()
        })
    }

    /// Validity already passed while the quotation is still open.
    pub fn is_expired(&self) -> Signal<bool> {
        let valid_until = self.valid_until;
        let status = self.status;
        Signal::derive(move || {
            let probe = Quotation {
                valid_until: opt_text(valid_until.get()),
                status: QuotationStatus::parse(&status.get()),
                ..Quotation::default()
            };
            probe.is_expired(&today_iso())
        })
    }

    /// Open quotation without an order yet.
    pub fn can_convert(&self) -> Signal<bool> {
        let original = self.original;
        let linked_order = self.linked_order;
        let converting = self.converting;
        let saving = self.saving;
        Signal::derive(move || {
            !converting.get()
                && !saving.get()
                && linked_order.with(Option::is_none)
                && original.with(|q| q.can_convert_to_order())
        })
    }

    pub fn open_order(&self) {
        if let Some((id, title)) = self
            .linked_order
            .with_untracked(|o| o.as_ref().and_then(|o| Some((o.id?, o.display_name()))))
        {
            self.tabs.open_detail::<Order>(id, &title);
        }
    }

    pub fn from_aggregate(&self, q: &Quotation) {
        self.original.set(q.clone());
        self.id.set(q.id);
        self.doc.fill(&q.folio, q.customer_id, &q.date, &q.notes, &q.items);
        self.valid_until.set(date_text_of(&q.valid_until));
        self.status.set(q.status.as_str().to_string());
    }

    pub fn to_aggregate(&self) -> Quotation {
        let original = self.original.get_untracked();
        let mut quotation = Quotation {
            id: self.id.get_untracked(),
            folio: self.doc.folio_value(),
            customer_id: parse_id(&self.doc.customer_id.get_untracked()),
            customer_name: self.doc.customer_name().or(original.customer_name.clone()),
            date: self.doc.date.get_untracked().trim().to_string(),
            valid_until: opt_text(self.valid_until.get_untracked()),
            status: QuotationStatus::parse(&self.status.get_untracked()),
            notes: self.doc.notes_value(),
            items: self.doc.lines(),
            ..original
        };
        quotation.recalculate(self.doc.iva_rate);
        quotation
    }

    pub fn load(&self, id: i64) {
        let this = self.clone();
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::fetch_by_id(&this.service, id).await {
                Ok(quotation) => this.from_aggregate(&quotation),
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast.api_error("No se pudo cargar la cotización", &e);
                }
            }
            match model::fetch_linked_order(&this.orders, id).await {
                Ok(order) => this.linked_order.set(order),
                Err(e) => log::warn!("linked order of quotation {id} not loaded: {e}"),
            }
            this.loading.set(false);
        });
    }

    /// Saves and stays on the tab; a new quotation moves to its own tab key.
    pub fn save(&self) {
        let quotation = self.to_aggregate();
        if let Err(msg) = quotation.validate() {
            self.error.set(Some(msg));
            return;
        }

        let this = self.clone();
        this.saving.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::save(&this.service, &quotation).await {
                Ok(saved) => {
                    this.toast.success(format!("{} guardada", saved.display_name()));
                    this.after_save(quotation.id, &saved);
                }
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast.api_error("No se pudo guardar la cotización", &e);
                }
            }
            this.saving.set(false);
        });
    }

    fn after_save(&self, previous_id: Option<i64>, saved: &Quotation) {
        self.from_aggregate(saved);
        let Some(id) = saved.id else {
            return;
        };
        let title = saved.display_name();
        match previous_id {
            None => self
                .tabs
                .replace_tab(&new_key::<Quotation>(), &Quotation::detail_key(id), &title),
            Some(_) => self.tabs.update_tab_title(&Quotation::detail_key(id), &title),
        }
    }

    /// Turns the stored quotation into a pending order and opens it.
    pub fn convert_to_order(&self) {
        let quotation = self.original.get_untracked();
        if self.linked_order.with_untracked(Option::is_some) {
            self.toast.warning("La cotización ya tiene un pedido");
            return;
        }
        if !quotation.can_convert_to_order() {
            self.toast
                .warning("Solo una cotización guardada, abierta y con partidas puede convertirse");
            return;
        }

        let this = self.clone();
        this.converting.set(true);

        spawn_local(async move {
            let today = today_iso();
            match model::convert_to_order(
                &this.service,
                &this.orders,
                &quotation,
                this.doc.iva_rate,
                &today,
            )
            .await
            {
                Ok((accepted, order)) => {
                    this.from_aggregate(&accepted);
                    this.linked_order.set(Some(order.clone()));
                    this.toast.success(format!(
                        "{} convertida en {}",
                        accepted.display_name(),
                        order.display_name().to_lowercase()
                    ));
                    if let Some(order_id) = order.id {
                        this.tabs.open_detail::<Order>(order_id, &order.display_name());
                    }
                }
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast.api_error("No se pudo convertir la cotización en pedido", &e);
                }
            }
            this.converting.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::DocumentLine;
    use contracts::shared::pricing::DiscountType;
    use crate::shared::components::line_items_editor::update_row;

    fn vm() -> QuotationDetailsVm {
        let config = AppConfig {
            api_base_url: "http://localhost:5000/api".into(),
            organization_id: Some(1),
            iva_rate: 0.16,
        };
        QuotationDetailsVm::new(&config, ToastService::new(), AppGlobalContext::new())
    }

    fn stored() -> Quotation {
        let mut line = DocumentLine::for_product(7, "Pintura vinílica", 500.0);
        line.quantity = 2.0;
        line.discount = 10.0;
        line.discount_type = DiscountType::Percentage;
        Quotation {
            id: Some(15),
            folio: "COT-0015".into(),
            customer_id: Some(4),
            customer_name: Some("Pinturas del Centro".into()),
            date: "2024-08-01".into(),
            valid_until: Some("2024-08-31".into()),
            items: vec![line],
            ..Default::default()
        }
    }

    #[test]
    fn edited_lines_flow_into_totals() {
        let vm = vm();
        vm.from_aggregate(&stored());
        vm.doc.rows.update(|rows| {
            let key = rows[0].key;
            update_row(rows, key, |l| l.quantity = 3.0);
        });

        let quotation = vm.to_aggregate();
        assert_eq!(quotation.items[0].line_total, 1350.0);
        assert_eq!(quotation.subtotal, 1500.0);
        assert_eq!(quotation.discount, 150.0);
        assert_eq!(quotation.iva, 216.0);
        assert_eq!(quotation.total, 1566.0);
        // Name kept from the record while the customer catalog is not loaded.
        assert_eq!(quotation.customer_name.as_deref(), Some("Pinturas del Centro"));
        assert!(quotation.validate().is_ok());
    }

    #[test]
    fn closed_quotations_are_readonly() {
        let vm = vm();
        vm.from_aggregate(&stored());
        assert!(!vm.is_readonly().get_untracked());
        vm.status.set(QuotationStatus::Accepted.as_str().into());
        assert!(vm.is_readonly().get_untracked());
    }

    #[test]
    fn conversion_needs_a_stored_quotation() {
        let vm = vm();
        assert!(!vm.can_convert().get_untracked());
        vm.from_aggregate(&stored());
        assert!(vm.can_convert().get_untracked());

        let order = model::order_for(&stored(), 0.16, "2024-08-05");
        assert_eq!(order.quotation_id, Some(15));
        assert_eq!(order.date, "2024-08-05");
        assert_eq!(order.total, stored_total());
    }

    #[test]
    fn converted_quotations_cannot_be_converted_again() {
        let vm = vm();
        vm.from_aggregate(&Quotation {
            status: QuotationStatus::Accepted,
            ..stored()
        });
        assert!(!vm.can_convert().get_untracked());

        // Order created but the quotation was left open.
        vm.from_aggregate(&stored());
        vm.linked_order.set(Some(Order {
            id: Some(30),
            quotation_id: Some(15),
            ..Default::default()
        }));
        assert!(!vm.can_convert().get_untracked());
        vm.linked_order.set(None);
        assert!(vm.can_convert().get_untracked());
    }

    #[test]
    fn stored_validity_datetime_fits_the_date_input() {
        let vm = vm();
        vm.from_aggregate(&Quotation {
            date: "2024-08-01T00:00:00".into(),
            valid_until: Some("2024-08-01T00:00:00".into()),
            ..stored()
        });
        assert_eq!(vm.doc.date.get_untracked(), "2024-08-01");
        assert_eq!(vm.valid_until.get_untracked(), "2024-08-01");
        assert!(vm.to_aggregate().validate().is_ok());
    }

    fn stored_total() -> f64 {
        let mut q = stored();
        q.recalculate(0.16);
        q.total
    }
}
