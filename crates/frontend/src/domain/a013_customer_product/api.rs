use contracts::domain::a013_customer_product::aggregate::CustomerProduct;

use crate::shared::api::{use_crud, CrudService};

pub type CustomerProductService = CrudService<CustomerProduct>;

pub fn use_service() -> CustomerProductService {
    use_crud::<CustomerProduct>()
}
