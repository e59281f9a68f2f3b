use contracts::domain::a012_customer_fiscal_data::aggregate::CustomerFiscalData;

use crate::shared::api::{use_crud, CrudService};

pub type CustomerFiscalDataService = CrudService<CustomerFiscalData>;

pub fn use_service() -> CustomerFiscalDataService {
    use_crud::<CustomerFiscalData>()
}
