use contracts::domain::a011_customer_delivery_address::aggregate::CustomerDeliveryAddress;
use contracts::domain::a014_quotation::aggregate::Quotation;
use contracts::domain::a015_order::aggregate::{Order, OrderStatus};
use contracts::domain::a016_sale::aggregate::Sale;
use contracts::domain::common::{CommercialDocument, ErpEntity};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model;
use crate::config::AppConfig;
use crate::domain::a011_customer_delivery_address::api::CustomerDeliveryAddressService;
use crate::domain::a015_order::api::OrderService;
use crate::domain::a016_sale::api::SaleService;
use crate::layout::global_context::{new_key, AppGlobalContext};
use crate::shared::api::CrudService;
use crate::shared::components::form::{date_text_of, id_text, opt_text, parse_id};
use crate::shared::document_form::DocumentForm;
use crate::shared::format::today_iso;
use crate::shared::toast::ToastService;

#[derive(Clone)]
pub struct OrderDetailsVm {
    service: OrderService,
    sales: SaleService,
    addresses_service: CustomerDeliveryAddressService,
    toast: ToastService,
    tabs: AppGlobalContext,
    original: RwSignal<Order>,

    pub id: RwSignal<Option<i64>>,
    pub doc: DocumentForm,
    pub delivery_date: RwSignal<String>,
    pub delivery_address_id: RwSignal<String>,
    pub status: RwSignal<String>,
    /// Delivery addresses of the selected customer
    pub addresses: RwSignal<Vec<CustomerDeliveryAddress>>,
    /// Sales created from this order
    pub order_sales: RwSignal<Vec<Sale>>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub converting: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl OrderDetailsVm {
    pub fn new(config: &AppConfig, toast: ToastService, tabs: AppGlobalContext) -> Self {
        Self {
            service: CrudService::new(config),
            sales: CrudService::new(config),
            addresses_service: CrudService::new(config),
            toast,
            tabs,
            original: RwSignal::new(Order::default()),
            id: RwSignal::new(None),
            doc: DocumentForm::new(config.iva_rate),
            delivery_date: RwSignal::new(String::new()),
            delivery_address_id: RwSignal::new(String::new()),
            status: RwSignal::new(OrderStatus::Pending.as_str().to_string()),
            addresses: RwSignal::new(Vec::new()),
            order_sales: RwSignal::new(Vec::new()),
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

    /// Shipped, delivered and cancelled orders keep their lines.
    pub fn is_readonly(&self) -> Signal<bool> {
        let status = self.status;
        Signal::derive(move || !OrderStatus::parse(&status.get()).is_editable())
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

    /// Stored order without a live sale.
    pub fn can_convert(&self) -> Signal<bool> {
        let original = self.original;
        let order_sales = self.order_sales;
        let converting = self.converting;
        let saving = self.saving;
        Signal::derive(move || {
            !converting.get()
                && !saving.get()
                && order_sales.with(|sales| original.with(|o| o.can_convert_to_sale(sales)))
        })
    }

    /// The live sale of this order, id and title.
    pub fn linked_sale(&self) -> Signal<Option<(i64, String)>> {
        let original = self.original;
        let order_sales = self.order_sales;
        Signal::derive(move || {
            let order_id = original.with(|o| o.id)?;
            order_sales.with(|sales| {
                Sale::for_order(sales, order_id).and_then(|s| Some((s.id?, s.display_name())))
            })
        })
    }

    /// Quotation this order came from.
    pub fn quotation_id(&self) -> Signal<Option<i64>> {
        let original = self.original;
        Signal::derive(move || original.with(|o| o.quotation_id))
    }

    pub fn from_aggregate(&self, order: &Order) {
        self.original.set(order.clone());
        self.id.set(order.id);
        self.doc.fill(&order.folio, order.customer_id, &order.date, &order.notes, &order.items);
        self.delivery_date.set(date_text_of(&order.delivery_date));
        self.delivery_address_id.set(id_text(order.delivery_address_id));
        self.status.set(order.status.as_str().to_string());
    }

    pub fn to_aggregate(&self) -> Order {
        let original = self.original.get_untracked();
        let mut order = Order {
            id: self.id.get_untracked(),
            folio: self.doc.folio_value(),
            customer_id: parse_id(&self.doc.customer_id.get_untracked()),
            customer_name: self.doc.customer_name().or(original.customer_name.clone()),
            date: self.doc.date.get_untracked().trim().to_string(),
            delivery_date: opt_text(self.delivery_date.get_untracked()),
            delivery_address_id: parse_id(&self.delivery_address_id.get_untracked()),
            status: OrderStatus::parse(&self.status.get_untracked()),
            notes: self.doc.notes_value(),
            items: self.doc.lines(),
            ..original
        };
        order.recalculate(self.doc.iva_rate);
        order
    }

    pub fn load(&self, id: i64) {
        let this = self.clone();
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::fetch_by_id(&this.service, id).await {
                Ok(order) => this.from_aggregate(&order),
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast.api_error("No se pudo cargar el pedido", &e);
                }
            }
            this.refresh_sales(id).await;
            this.loading.set(false);
        });
    }

    async fn refresh_sales(&self, order_id: i64) {
        match model::fetch_order_sales(&self.sales, order_id).await {
            Ok(sales) => self.order_sales.set(sales),
            Err(e) => log::warn!("sales of order {order_id} not loaded: {e}"),
        }
    }

    /// Reloads the address list for `customer_id` and keeps the selection
    /// valid for it.
    pub fn load_addresses(&self, customer_id: Option<i64>) {
        let Some(customer_id) = customer_id else {
            self.addresses.set(Vec::new());
            self.delivery_address_id.set(String::new());
            return;
        };

        let this = self.clone();
        spawn_local(async move {
            match model::fetch_addresses(&this.addresses_service, customer_id).await {
                Ok(addresses) => this.set_addresses(addresses),
                Err(e) => this
                    .toast
                    .api_error("No se pudieron cargar las direcciones de entrega", &e),
            }
        });
    }

    pub fn set_addresses(&self, addresses: Vec<CustomerDeliveryAddress>) {
        let current = parse_id(&self.delivery_address_id.get_untracked());
        self.delivery_address_id
            .set(id_text(model::preselected_address(current, &addresses)));
        self.addresses.set(addresses);
    }

    pub fn save(&self) {
        let order = self.to_aggregate();
        if let Err(msg) = order.validate() {
            self.error.set(Some(msg));
            return;
        }

        let this = self.clone();
        this.saving.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::save(&this.service, &order).await {
                Ok(saved) => {
                    this.toast.success(format!("{} guardado", saved.display_name()));
                    this.after_save(order.id, &saved);
                }
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast.api_error("No se pudo guardar el pedido", &e);
                }
            }
            this.saving.set(false);
        });
    }

    fn after_save(&self, previous_id: Option<i64>, saved: &Order) {
        self.from_aggregate(saved);
        let Some(id) = saved.id else {
            return;
        };
        let title = saved.display_name();
        match previous_id {
            None => self
                .tabs
                .replace_tab(&new_key::<Order>(), &Order::detail_key(id), &title),
            Some(_) => self.tabs.update_tab_title(&Order::detail_key(id), &title),
        }
    }

    /// Creates a pending sale from the stored order and opens it.
    pub fn convert_to_sale(&self) {
        let order = self.original.get_untracked();
        if !self.order_sales.with_untracked(|sales| order.can_convert_to_sale(sales)) {
            self.toast.warning(
                "Solo un pedido guardado, con partidas, no cancelado y sin venta puede convertirse",
            );
            return;
        }

        let this = self.clone();
        this.converting.set(true);

        spawn_local(async move {
            let today = today_iso();
            match model::convert_to_sale(&this.sales, &order, this.doc.iva_rate, &today).await {
                Ok(sale) => {
                    this.toast.success(format!(
                        "{} convertido en {}",
                        order.display_name(),
                        sale.display_name().to_lowercase()
                    ));
                    this.order_sales.update(|sales| sales.push(sale.clone()));
                    if let Some(sale_id) = sale.id {
                        this.tabs.open_detail::<Sale>(sale_id, &sale.display_name());
                    }
                }
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    this.toast.api_error("No se pudo convertir el pedido en venta", &e);
                    if let Some(order_id) = order.id {
                        this.refresh_sales(order_id).await;
                    }
                }
            }
            this.converting.set(false);
        });
    }

    pub fn open_sale(&self) {
        if let Some((id, title)) = self.linked_sale().get_untracked() {
            self.tabs.open_detail::<Sale>(id, &title);
        }
    }

    pub fn open_quotation(&self) {
        if let Some(quotation_id) = self.original.with_untracked(|o| o.quotation_id) {
            let title = format!("{} #{}", Quotation::element_name(), quotation_id);
            self.tabs.open_detail::<Quotation>(quotation_id, &title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::DocumentLine;

    fn vm() -> OrderDetailsVm {
        let config = AppConfig {
            api_base_url: "http://localhost:5000/api".into(),
            organization_id: Some(1),
            iva_rate: 0.16,
        };
        OrderDetailsVm::new(&config, ToastService::new(), AppGlobalContext::new())
    }

    fn stored() -> Order {
        Order {
            id: Some(21),
            folio: "PED-0021".into(),
            customer_id: Some(5),
            customer_name: Some("Muebles Arteaga".into()),
            quotation_id: Some(15),
            date: "2024-09-02".into(),
            delivery_address_id: Some(40),
            items: vec![DocumentLine::for_product(3, "Silla ejecutiva", 2_000.0)],
            ..Default::default()
        }
    }

    #[test]
    fn delivery_fields_reach_the_dto() {
        let vm = vm();
        vm.from_aggregate(&stored());
        vm.delivery_date.set("2024-09-10".into());

        let order = vm.to_aggregate();
        assert_eq!(order.delivery_date.as_deref(), Some("2024-09-10"));
        assert_eq!(order.delivery_address_id, Some(40));
        assert_eq!(order.quotation_id, Some(15));
        assert_eq!(order.total, 2_320.0);
    }

    #[test]
    fn customer_change_resets_to_its_default_address() {
        let vm = vm();
        vm.from_aggregate(&stored());
        vm.set_addresses(vec![
            CustomerDeliveryAddress {
                id: Some(77),
                is_default: true,
                ..CustomerDeliveryAddress::for_customer(6)
            },
        ]);
        assert_eq!(vm.delivery_address_id.get_untracked(), "77");
    }

    #[test]
    fn an_order_with_a_sale_cannot_be_converted_again() {
        let vm = vm();
        vm.from_aggregate(&stored());
        assert!(vm.can_convert().get_untracked());
        assert_eq!(vm.linked_sale().get_untracked(), None);

        vm.order_sales.set(vec![Sale {
            id: Some(60),
            folio: "VTA-0060".into(),
            order_id: Some(21),
            ..Default::default()
        }]);
        assert!(!vm.can_convert().get_untracked());
        assert_eq!(
            vm.linked_sale().get_untracked(),
            Some((60, "Venta VTA-0060".to_string()))
        );
    }

    #[test]
    fn stored_delivery_datetime_fits_the_date_input() {
        let vm = vm();
        vm.from_aggregate(&Order {
            date: "2024-09-02T10:00:00".into(),
            delivery_date: Some("2024-09-02T00:00:00".into()),
            ..stored()
        });
        assert_eq!(vm.doc.date.get_untracked(), "2024-09-02");
        assert_eq!(vm.delivery_date.get_untracked(), "2024-09-02");
        assert!(vm.to_aggregate().validate().is_ok());
    }

    #[test]
    fn shipped_orders_are_readonly() {
        let vm = vm();
        vm.from_aggregate(&stored());
        assert!(!vm.is_readonly().get_untracked());
        assert!(vm.can_convert().get_untracked());
        vm.status.set(OrderStatus::Shipped.as_str().into());
        assert!(vm.is_readonly().get_untracked());
    }
}
