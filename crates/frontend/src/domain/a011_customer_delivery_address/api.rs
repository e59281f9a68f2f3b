use contracts::domain::a011_customer_delivery_address::aggregate::CustomerDeliveryAddress;

use crate::shared::api::{use_crud, CrudService};

pub type CustomerDeliveryAddressService = CrudService<CustomerDeliveryAddress>;

pub fn use_service() -> CustomerDeliveryAddressService {
    use_crud::<CustomerDeliveryAddress>()
}
