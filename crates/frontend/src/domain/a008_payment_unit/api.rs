use contracts::domain::a008_payment_unit::aggregate::PaymentUnit;

use crate::shared::api::{use_crud, CrudService};

pub type PaymentUnitService = CrudService<PaymentUnit>;

pub fn use_service() -> PaymentUnitService {
    use_crud::<PaymentUnit>()
}
