use contracts::domain::a017_payment::aggregate::Payment;

use crate::shared::api::{use_crud, CrudService};

pub type PaymentService = CrudService<Payment>;

pub fn use_service() -> PaymentService {
    use_crud::<Payment>()
}
