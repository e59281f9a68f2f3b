use contracts::domain::a018_product::aggregate::{Product, DEFAULT_UNIT};
use contracts::domain::common::ErpEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::model;
use crate::domain::a018_product::api::ProductService;
use crate::shared::components::form::{amount_text, opt_text, parse_amount, text_of};
use crate::shared::toast::ToastService;

#[derive(Clone)]
pub struct ProductDetailsVm {
    service: ProductService,
    toast: ToastService,
    original: RwSignal<Product>,

    pub id: RwSignal<Option<i64>>,
    pub sku: RwSignal<String>,
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
    pub unit: RwSignal<String>,
    pub unit_price: RwSignal<String>,
    pub cost: RwSignal<String>,
    pub stock: RwSignal<String>,
    pub min_stock: RwSignal<String>,
    pub applies_iva: RwSignal<bool>,
    pub is_active: RwSignal<bool>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ProductDetailsVm {
    pub fn new(service: ProductService, toast: ToastService) -> Self {
        let vm = Self {
            service,
            toast,
            original: RwSignal::new(Product::default()),
            id: RwSignal::new(None),
            sku: RwSignal::new(String::new()),
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            unit: RwSignal::new(DEFAULT_UNIT.to_string()),
            unit_price: RwSignal::new(String::new()),
            cost: RwSignal::new(String::new()),
            stock: RwSignal::new(String::new()),
            min_stock: RwSignal::new(String::new()),
            applies_iva: RwSignal::new(true),
            is_active: RwSignal::new(true),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        };
        vm.from_aggregate(&Product::default());
        vm
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    pub fn is_save_disabled(&self) -> Signal<bool> {
        let saving = self.saving;
        let loading = self.loading;
        let sku = self.sku;
        let name = self.name;
        Signal::derive(move || {
            saving.get()
                || loading.get()
                || sku.get().trim().is_empty()
                || name.get().trim().is_empty()
        })
    }

    /// Margin of the prices as typed, for the live hint under the price fields.
    pub fn margin(&self) -> Signal<Option<f64>> {
        let unit_price = self.unit_price;
        let cost = self.cost;
        Signal::derive(move || {
            Product {
                unit_price: parse_amount(&unit_price.get()),
                cost: parse_amount(&cost.get()),
                ..Product::default()
            }
            .margin()
        })
    }

    pub fn from_aggregate(&self, p: &Product) {
        self.original.set(p.clone());
        self.id.set(p.id);
        self.sku.set(p.sku.clone());
        self.name.set(p.name.clone());
        self.description.set(text_of(&p.description));
        self.unit.set(p.unit.clone());
        self.unit_price.set(amount_text(p.unit_price));
        self.cost.set(amount_text(p.cost));
        self.stock.set(amount_text(p.stock));
        self.min_stock.set(amount_text(p.min_stock));
        self.applies_iva.set(p.applies_iva);
        self.is_active.set(p.is_active);
    }

    pub fn to_aggregate(&self) -> Product {
        let unit = self.unit.get_untracked().trim().to_uppercase();
        Product {
            id: self.id.get_untracked(),
            sku: self.sku.get_untracked().trim().to_string(),
            name: self.name.get_untracked().trim().to_string(),
            description: opt_text(self.description.get_untracked()),
            unit: if unit.is_empty() { DEFAULT_UNIT.to_string() } else { unit },
            unit_price: parse_amount(&self.unit_price.get_untracked()),
            cost: parse_amount(&self.cost.get_untracked()),
            stock: parse_amount(&self.stock.get_untracked()),
            min_stock: parse_amount(&self.min_stock.get_untracked()),
            applies_iva: self.applies_iva.get_untracked(),
            is_active: self.is_active.get_untracked(),
            ..self.original.get_untracked()
        }
    }

    pub fn load(&self, id: i64) {
        let this = self.clone();
        let toast = this.toast;
        this.loading.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::fetch_by_id(&this.service, id).await {
                Ok(product) => this.from_aggregate(&product),
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    toast.api_error("No se pudo cargar el producto", &e);
                }
            }
            this.loading.set(false);
        });
    }

    pub fn save(&self, on_saved: Callback<()>) {
        let product = self.to_aggregate();
        if let Err(msg) = product.validate() {
            self.error.set(Some(msg));
            return;
        }

        let this = self.clone();
        let toast = this.toast;
        this.saving.set(true);
        this.error.set(None);

        spawn_local(async move {
            match model::save(&this.service, &product).await {
                Ok(saved) => {
                    toast.success(format!("Producto \"{}\" guardado", saved.display_name()));
                    on_saved.run(());
                }
                Err(e) => {
                    this.error.set(Some(e.user_message()));
                    toast.api_error("No se pudo guardar el producto", &e);
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

    fn vm() -> ProductDetailsVm {
        let config = AppConfig {
            api_base_url: "http://localhost:5000/api".into(),
            organization_id: None,
            iva_rate: 0.16,
        };
        ProductDetailsVm::new(CrudService::new(&config), ToastService::new())
    }

    #[test]
    fn blank_unit_falls_back_to_pieces() {
        let vm = vm();
        vm.sku.set("cab-001".into());
        vm.name.set("Cable UTP".into());
        vm.unit.set("  ".into());
        vm.unit_price.set("120".into());
        let product = vm.to_aggregate();
        assert_eq!(product.unit, DEFAULT_UNIT);
        assert_eq!(product.unit_price, 120.0);
        assert!(product.applies_iva);
        assert!(product.validate().is_ok());
    }

    #[test]
    fn live_margin_follows_typed_prices() {
        let vm = vm();
        vm.unit_price.set("200".into());
        vm.cost.set("150".into());
        assert_eq!(vm.margin().get_untracked(), Some(25.0));
        vm.unit_price.set("".into());
        assert_eq!(vm.margin().get_untracked(), None);
    }
}
