use contracts::domain::a015_order::aggregate::Order;

use crate::shared::api::{use_crud, CrudService};

pub type OrderService = CrudService<Order>;

pub fn use_service() -> OrderService {
    use_crud::<Order>()
}
