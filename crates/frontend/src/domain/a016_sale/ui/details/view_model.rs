use contracts::domain::a016_sale::aggregate::{Sale, SaleStatus};
use contracts::domain::a017_payment::aggregate::{Payment, PaymentMethod};
use contracts::domain::common::{CommercialDocument, ErpEntity};
use contracts::shared::error::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model;
use crate::config::AppConfig;
use crate::domain::a016_sale::api::SaleService;
use crate::domain::a017_payment::api::PaymentService;
use crate::layout::global_context::{new_key, AppGlobalContext};
use crate::shared::api::CrudService;
use crate::shared::components::form::{amount_text, opt_text, parse_amount, parse_id};
use crate::shared::document_form::DocumentForm;
use crate::shared::format::{format_money, today_iso};
use crate::shared::list_state::confirm;
use crate::shared::toast::ToastService;

/// Capture fields of the next payment.
#[derive(Clone, Copy)]
pub struct PaymentDraft {
    pub payment_date: RwSignal<String>,
    pub amount: RwSignal<String>,
    pub payment_method: RwSignal<String>,
    pub reference: RwSignal<String>,
    pub notes: RwSignal<String>,
}

impl PaymentDraft {
    fn new() -> Self {
        Self {
            payment_date: RwSignal::new(today_iso()),
            amount: RwSignal::new(String::new()),
            payment_method: RwSignal::new(PaymentMethod::Cash.as_str().to_string()),
            reference: RwSignal::new(String::new()),
            notes: RwSignal::new(String::new()),
        }
    }

    /// Clears the draft and proposes the outstanding balance.
    pub fn reset(&self, balance: f64) {
        self.payment_date.set(today_iso());
        self.amount.set(if balance > 0.0 { amount_text(balance) } else { String::new() });
        self.reference.set(String::new());
        self.notes.set(String::new());
    }

    pub fn to_payment(&self, sale_id: i64) -> Payment {
        Payment {
            payment_method: PaymentMethod::parse(&self.payment_method.get_untracked()),
            reference: opt_text(self.reference.get_untracked()),
            notes: opt_text(self.notes.get_untracked()),
            ..Payment::for_sale(
                sale_id,
                self.payment_date.get_untracked().trim(),
                parse_amount(&self.amount.get_untracked()),
            )
        }
    }

    pub fn needs_reference(&self) -> Signal<bool> {
        let method = self.payment_method;
        Signal::derive(move || PaymentMethod::parse(&method.get()).requires_reference())
    }
}

#[derive(Clone)]
pub struct SaleDetailsVm {
    service: SaleService,
    payments_service: PaymentService,
    toast: ToastService,
    tabs: AppGlobalContext,
    /// Last stored version, source of paid amount, balance and status
    pub original: RwSignal<Sale>,

    pub id: RwSignal<Option<i64>>,
    pub doc: DocumentForm,
    pub payment_method: RwSignal<String>,
    pub payments: RwSignal<Vec<Payment>>,
    pub draft: PaymentDraft,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub registering: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl SaleDetailsVm {
    pub fn new(config: &AppConfig, toast: ToastService, tabs: AppGlobalContext) -> Self {
        Self {
            service: CrudService::new(config),
            payments_service: CrudService::new(config),
            toast,
            tabs,
            original: RwSignal::new(Sale::default()),
            id: RwSignal::new(None),
            doc: DocumentForm::new(config.iva_rate),
            payment_method: RwSignal::new(PaymentMethod::Cash.as_str().to_string()),
            payments: RwSignal::new(Vec::new()),
            draft: PaymentDraft::new(),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            registering: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    /// Lines freeze with the first payment or on cancellation.
    pub fn is_readonly(&self) -> Signal<bool> {
        let original = self.original;
        Signal::derive(move || !original.with(|s| s.is_editable()))
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let saving = self.saving;
        let loading = self.loading;
        let customer = self.doc.customer_id;
        let original = self.original;
        Signal::derive(move || {
            saving.get()
                || loading.get()
                || customer.get().is_empty()
                || original.with(|s| s.status == SaleStatus::Cancelled)
        })
    }

    pub fn status(&self) -> Signal<SaleStatus> {
        let original = self.original;
        Signal::derive(move || original.with(|s| s.status))
    }

    pub fn amount_paid(&self) -> Signal<f64> {
        let original = self.original;
        Signal::derive(move || original.with(|s| s.amount_paid))
    }

    pub fn accepts_payments(&self) -> Signal<bool> {
        let original = self.original;
        let registering = self.registering;
        Signal::derive(move || !registering.get() && original.with(|s| s.accepts_payments()))
    }

    pub fn can_cancel(&self) -> Signal<bool> {
        let original = self.original;
        Signal::derive(move || {
            original.with(|s| {
                s.id.is_some() && s.status != SaleStatus::Cancelled && s.amount_paid <= 0.0
            })
        })
    }

    /// Due date from the selected customer's credit terms.
    pub fn due_date(&self) -> Signal<Option<String>> {
        let doc = self.doc;
        let original = self.original;
        Signal::derive(move || {
            let customer_id = parse_id(&doc.customer_id.get());
            let date = doc.date.get();
            doc.customers.with(|customers| {
                let customer = customers.iter().find(|c| c.id.is_some() && c.id == customer_id);
                let probe = Sale {
                    date: date.clone(),
                    ..original.get()
                };
                model::due_date_for(&probe, customer)
            })
        })
    }

    pub fn from_aggregate(&self, sale: &Sale) {
        self.original.set(sale.clone());
        self.id.set(sale.id);
        self.doc.fill(&sale.folio, sale.customer_id, &sale.date, &sale.notes, &sale.items);
        self.payment_method.set(sale.payment_method.as_str().to_string());
        self.draft.payment_method.set(sale.payment_method.as_str().to_string());
        self.draft.reset(sale.balance);
    }

    /// Form contents as a sale; paid amount and balance follow the payments.
    pub fn to_aggregate(&self) -> Sale {
        let original = self.original.get_untracked();
        let mut sale = Sale {
            id: self.id.get_untracked(),
            folio: self.doc.folio_value(),
            customer_id: parse_id(&self.doc.customer_id.get_untracked()),
            customer_name: self.doc.customer_name().or(original.customer_name.clone()),
            date: self.doc.date.get_untracked().trim().to_string(),
            payment_method: PaymentMethod::parse(&self.payment_method.get_untracked()),
            notes: self.doc.notes_value(),
            items: self.doc.lines(),
            ..original
        };
        sale.recalculate(self.doc.iva_rate);
        self.payments.with_untracked(|payments| sale.apply_payments(payments));
        sale
    }

    pub fn load(&self, id: i64) {
        let this = self.clone();
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::fetch_by_id(&this.service, id).await {
                Ok(sale) => {
                    this.from_aggregate(&sale);
                    this.load_payments(sale).await;
                }
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast.api_error("No se pudo cargar la venta", &e);
                }
            }
            this.loading.set(false);
        });
    }

    async fn load_payments(&self, sale: Sale) {
        let Some(sale_id) = sale.id else {
            return;
        };
        let payments = match model::fetch_payments(&self.payments_service, sale_id).await {
            Ok(payments) => payments,
            Err(e) => {
                self.toast.api_error("No se pudieron cargar los pagos", &e);
                return;
            }
        };
        self.payments.set(payments.clone());
        // Stored balance may lag behind payments registered elsewhere.
        match model::sync_balance(&self.service, &sale, &payments).await {
            Ok(synced) => self.set_stored(&synced),
            Err(e) => self.toast.api_error("No se pudo actualizar el saldo de la venta", &e),
        }
    }

    /// Takes the stored sale's derived fields without touching the form.
    fn set_stored(&self, sale: &Sale) {
        self.original.set(sale.clone());
        self.draft.reset(sale.balance);
    }

    pub fn save(&self) {
        let sale = self.to_aggregate();
        if let Err(msg) = sale.validate() {
            self.error.set(Some(msg));
            return;
        }

        let this = self.clone();
        this.saving.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::save(&this.service, &sale).await {
                Ok(saved) => {
                    this.toast.success(format!("{} guardada", saved.display_name()));
                    this.after_save(sale.id, &saved);
                }
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast.api_error("No se pudo guardar la venta", &e);
                }
            }
            this.saving.set(false);
        });
    }

    fn after_save(&self, previous_id: Option<i64>, saved: &Sale) {
        self.from_aggregate(saved);
        let Some(id) = saved.id else {
            return;
        };
        let title = saved.display_name();
        match previous_id {
            None => self
                .tabs
                .replace_tab(&new_key::<Sale>(), &Sale::detail_key(id), &title),
            Some(_) => self.tabs.update_tab_title(&Sale::detail_key(id), &title),
        }
    }

    pub fn cancel_sale(&self) {
        let sale = self.original.get_untracked();
        let question = format!(
            "¿Cancelar la {}? Esta acción no se puede deshacer.",
            sale.display_name().to_lowercase()
        );
        if !confirm(&question) {
            return;
        }

        let this = self.clone();
        this.saving.set(true);
        spawn_local(async move {
            match model::cancel(&this.service, &sale).await {
                Ok(cancelled) => {
                    this.toast.info(format!("{} cancelada", cancelled.display_name()));
                    this.set_stored(&cancelled);
                }
                Err(e) => this.toast.api_error("No se pudo cancelar la venta", &e),
            }
            this.saving.set(false);
        });
    }

    /// Payment from the draft, checked against the current balance.
    pub fn draft_payment(&self) -> Result<Payment, String> {
        let sale = self.original.get_untracked();
        let sale_id = sale
            .id
            .ok_or_else(|| "Guarde la venta antes de registrar pagos".to_string())?;
        let payment = self.draft.to_payment(sale_id);
        model::check_payment(&sale, &payment)?;
        Ok(payment)
    }

    pub fn register_payment(&self) {
        let payment = match self.draft_payment() {
            Ok(payment) => payment,
            Err(msg) => {
                self.toast.warning(msg);
                return;
            }
        };

        let this = self.clone();
        this.registering.set(true);
        spawn_local(async move {
            let sale = this.original.get_untracked();
            let result = model::register_payment(
                &this.service,
                &this.payments_service,
                &sale,
                &payment,
            )
            .await;
            this.after_payment_change(result, "Pago registrado", "No se pudo registrar el pago");
            this.registering.set(false);
        });
    }

    pub fn delete_payment(&self, payment: &Payment) {
        let Some(payment_id) = payment.id else {
            return;
        };
        if !confirm(&format!("¿Eliminar el pago de {}?", format_money(payment.amount))) {
            return;
        }

        let this = self.clone();
        this.registering.set(true);
        spawn_local(async move {
            let sale = this.original.get_untracked();
            let result = model::delete_payment(
                &this.service,
                &this.payments_service,
                &sale,
                payment_id,
            )
            .await;
            this.after_payment_change(result, "Pago eliminado", "No se pudo eliminar el pago");
            this.registering.set(false);
        });
    }

    fn after_payment_change(
        &self,
        result: Result<(Sale, Vec<Payment>), ApiError>,
        done: &str,
        failed: &str,
    ) {
        match result {
            Ok((sale, payments)) => {
                self.payments.set(payments);
                self.set_stored(&sale);
                self.toast.success(done);
            }
            Err(e) => self.toast.api_error(failed, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a010_customer::aggregate::Customer;
    use contracts::domain::common::DocumentLine;

    fn vm() -> SaleDetailsVm {
        let config = AppConfig {
            api_base_url: "http://localhost:5000/api".into(),
            organization_id: Some(1),
            iva_rate: 0.16,
        };
        SaleDetailsVm::new(&config, ToastService::new(), AppGlobalContext::new())
    }

    fn stored() -> Sale {
        let mut sale = Sale {
            id: Some(30),
            folio: "VTA-0030".into(),
            customer_id: Some(2),
            date: "2024-10-01".into(),
            items: vec![DocumentLine::for_product(5, "Impresora", 1_000.0)],
            ..Default::default()
        };
        sale.recalculate(0.16);
        sale.balance = sale.total;
        sale
    }

    #[test]
    fn draft_proposes_the_balance() {
        let vm = vm();
        vm.from_aggregate(&stored());
        assert_eq!(vm.draft.amount.get_untracked(), "1160");
        let payment = vm.draft_payment().unwrap();
        assert_eq!(payment.sale_id, 30);
        assert_eq!(payment.amount, 1_160.0);
    }

    #[test]
    fn transfer_without_reference_is_not_drafted() {
        let vm = vm();
        vm.from_aggregate(&stored());
        vm.draft.payment_method.set(PaymentMethod::Transfer.as_str().into());
        assert!(vm.draft.needs_reference().get_untracked());
        assert!(vm.draft_payment().is_err());
        vm.draft.reference.set("SPEI 4471".into());
        assert!(vm.draft_payment().is_ok());
    }

    #[test]
    fn paid_sale_freezes_lines_and_keeps_balance() {
        let vm = vm();
        let mut sale = stored();
        sale.apply_payments(&[Payment::for_sale(30, "2024-10-02", 160.0)]);
        vm.from_aggregate(&sale);
        vm.payments.set(vec![Payment::for_sale(30, "2024-10-02", 160.0)]);

        assert!(vm.is_readonly().get_untracked());
        assert!(!vm.can_cancel().get_untracked());
        let dto = vm.to_aggregate();
        assert_eq!(dto.amount_paid, 160.0);
        assert_eq!(dto.balance, 1_000.0);
        assert_eq!(dto.status, SaleStatus::PartiallyPaid);
    }

    #[test]
    fn due_date_follows_customer_credit() {
        let vm = vm();
        vm.from_aggregate(&stored());
        assert_eq!(vm.due_date().get_untracked(), None);
        vm.doc.customers.set(vec![Customer {
            id: Some(2),
            credit_limit: 10_000.0,
            credit_days: 15,
            ..Default::default()
        }]);
        assert_eq!(vm.due_date().get_untracked().as_deref(), Some("2024-10-16"));
    }
}
