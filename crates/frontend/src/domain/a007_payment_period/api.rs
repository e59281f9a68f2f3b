use contracts::domain::a007_payment_period::aggregate::PaymentPeriod;

use crate::shared::api::{use_crud, CrudService};

pub type PaymentPeriodService = CrudService<PaymentPeriod>;

pub fn use_service() -> PaymentPeriodService {
    use_crud::<PaymentPeriod>()
}
