use contracts::domain::a010_customer::aggregate::Customer;
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model;
use crate::domain::a010_customer::api::CustomerService;
use crate::shared::components::form::{amount_text, opt_text, parse_amount, parse_count, text_of};
use crate::shared::toast::ToastService;

pub const TAB_GENERAL: &str = "general";
pub const TAB_ADDRESSES: &str = "addresses";
pub const TAB_FISCAL: &str = "fiscal";
pub const TAB_PRODUCTS: &str = "products";

#[derive(Clone)]
pub struct CustomerDetailsVm {
    service: CustomerService,
    toast: ToastService,
    original: RwSignal<Customer>,

    pub id: RwSignal<Option<i64>>,
    pub code: RwSignal<String>,
    pub business_name: RwSignal<String>,
    pub trade_name: RwSignal<String>,
    pub contact_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub credit_limit: RwSignal<String>,
    pub credit_days: RwSignal<String>,
    pub notes: RwSignal<String>,
    pub is_active: RwSignal<bool>,

    pub active_tab: RwSignal<&'static str>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl CustomerDetailsVm {
    pub fn new(service: CustomerService, toast: ToastService) -> Self {
        Self {
            service,
            toast,
            original: RwSignal::new(Customer::default()),
            id: RwSignal::new(None),
            code: RwSignal::new(String::new()),
            business_name: RwSignal::new(String::new()),
            trade_name: RwSignal::new(String::new()),
            contact_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            credit_limit: RwSignal::new(String::new()),
            credit_days: RwSignal::new(String::new()),
            notes: RwSignal::new(String::new()),
            is_active: RwSignal::new(true),
            active_tab: RwSignal::new(TAB_GENERAL),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let saving = self.saving;
        let loading = self.loading;
        let business_name = self.business_name;
        Signal::derive(move || {
            saving.get() || loading.get() || business_name.get().trim().is_empty()
        })
    }

    /// Sub-resource tabs need a stored customer; the general tab is always open.
    pub fn set_tab(&self, tab: &'static str) {
        if tab == TAB_GENERAL || self.id.get_untracked().is_some() {
            self.active_tab.set(tab);
        }
    }

    pub fn from_aggregate(&self, c: &Customer) {
        self.original.set(c.clone());
        self.id.set(c.id);
        self.code.set(c.code.clone());
        self.business_name.set(c.business_name.clone());
        self.trade_name.set(text_of(&c.trade_name));
        self.contact_name.set(text_of(&c.contact_name));
        self.email.set(text_of(&c.email));
        self.phone.set(text_of(&c.phone));
        self.credit_limit.set(amount_text(c.credit_limit));
        self.credit_days.set(c.credit_days.to_string());
        self.notes.set(text_of(&c.notes));
        self.is_active.set(c.is_active);
    }

    pub fn to_aggregate(&self) -> Customer {
        Customer {
            id: self.id.get_untracked(),
            code: self.code.get_untracked().trim().to_string(),
            business_name: self.business_name.get_untracked().trim().to_string(),
            trade_name: opt_text(self.trade_name.get_untracked()),
            contact_name: opt_text(self.contact_name.get_untracked()),
            email: opt_text(self.email.get_untracked()),
            phone: opt_text(self.phone.get_untracked()),
            credit_limit: parse_amount(&self.credit_limit.get_untracked()),
            credit_days: parse_count(&self.credit_days.get_untracked()),
            notes: opt_text(self.notes.get_untracked()),
            is_active: self.is_active.get_untracked(),
            ..self.original.get_untracked()
        }
    }

    pub fn load(&self, id: i64) {
        let this = self.clone();
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::fetch_by_id(&this.service, id).await {
                Ok(customer) => this.from_aggregate(&customer),
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast.api_error("No se pudo cargar el cliente", &e);
                }
            }
            this.loading.set(false);
        });
    }

    /// Saves the general data. A new customer stays open in edit mode so its
    /// addresses and fiscal data can be captured next (`on_created`); an edit
    /// closes the form (`on_saved`).
    pub fn save(&self, on_saved: Callback<()>, on_created: Callback<()>) {
        let customer = self.to_aggregate();
        if let Err(msg) = customer.validate() {
            self.error.set(Some(msg));
            return;
        }

        let this = self.clone();
        let was_new = customer.id.is_none();
        this.saving.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::save(&this.service, &customer).await {
                Ok(saved) if was_new && saved.id.is_some() => {
                    this.toast.success(format!(
                        "Cliente \"{}\" creado. Ya puede registrar sus direcciones y datos fiscales",
                        saved.short_name()
                    ));
                    this.from_aggregate(&saved);
                    on_created.run(());
                }
                Ok(saved) => {
                    this.toast.success(format!("Cliente \"{}\" guardado", saved.short_name()));
                    on_saved.run(());
                }
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast.api_error("No se pudo guardar el cliente", &e);
                }
            }
            this.saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::shared::api::CrudService;

    fn vm() -> CustomerDetailsVm {
        let config = AppConfig {
            api_base_url: "http://localhost:5000/api".into(),
            organization_id: Some(1),
            iva_rate: 0.16,
        };
        CustomerDetailsVm::new(CrudService::new(&config), ToastService::new())
    }

    #[test]
    fn form_text_becomes_the_dto() {
        let vm = vm();
        vm.code.set(" c-010 ".into());
        vm.business_name.set("Ferretería La Paz SA de CV".into());
        vm.trade_name.set("  ".into());
        vm.credit_limit.set("$25,000".into());
        vm.credit_days.set("15".into());

        let customer = vm.to_aggregate();
        assert_eq!(customer.code, "c-010");
        assert_eq!(customer.trade_name, None);
        assert_eq!(customer.credit_limit, 25_000.0);
        assert_eq!(customer.credit_days, 15);
        assert!(customer.has_credit());
        assert!(customer.validate().is_ok());
    }

    #[test]
    fn sub_resource_tabs_wait_for_an_id() {
        let vm = vm();
        vm.set_tab(TAB_ADDRESSES);
        assert_eq!(vm.active_tab.get_untracked(), TAB_GENERAL);

        vm.from_aggregate(&Customer {
            id: Some(4),
            business_name: "Abarrotes Juárez".into(),
            ..Default::default()
        });
        vm.set_tab(TAB_FISCAL);
        assert_eq!(vm.active_tab.get_untracked(), TAB_FISCAL);
        assert_eq!(vm.credit_limit.get_untracked(), "0");
    }
}
