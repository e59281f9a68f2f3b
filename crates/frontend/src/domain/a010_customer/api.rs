use contracts::domain::a010_customer::aggregate::Customer;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api::{use_crud, CrudService};
use crate::shared::toast::use_toast;

pub type CustomerService = CrudService<Customer>;

pub fn use_service() -> CustomerService {
    use_crud::<Customer>()
}

/// Every customer, loaded once, for document headers (names, credit days).
pub fn use_customer_catalog() -> RwSignal<Vec<Customer>> {
    let customers = RwSignal::new(Vec::new());
    let service = use_service();
    let toast = use_toast();

    spawn_local(async move {
        match service.get_all().await {
            Ok(items) => customers.set(items),
            Err(e) => toast.api_error("No se pudo cargar la lista de clientes", &e),
        }
    });

    customers
}
