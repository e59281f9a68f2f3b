use contracts::domain::a018_product::aggregate::Product;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{use_crud, CrudService};
use crate::shared::toast::use_toast;

pub type ProductService = CrudService<Product>;

pub fn use_service() -> ProductService {
    use_crud::<Product>()
}

/// Whole product catalog, loaded once, for pickers and list-price lookups.
pub fn use_product_catalog() -> RwSignal<Vec<Product>> {
    let products = RwSignal::new(Vec::new());
    let service = use_service();
    let toast = use_toast();

    spawn_local(async move {
        match service.get_all().await {
            Ok(items) => products.set(items),
            Err(e) => toast.api_error("No se pudo cargar el catálogo de productos", &e),
        }
    });

    products
}
