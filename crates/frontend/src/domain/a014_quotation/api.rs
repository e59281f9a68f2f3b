use contracts::domain::a014_quotation::aggregate::Quotation;

use crate::shared::api::{use_crud, CrudService};

pub type QuotationService = CrudService<Quotation>;

pub fn use_service() -> QuotationService {
    use_crud::<Quotation>()
}
