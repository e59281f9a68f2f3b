use contracts::domain::a016_sale::aggregate::Sale;

use crate::shared::api::{use_crud, CrudService};

pub type SaleService = CrudService<Sale>;

pub fn use_service() -> SaleService {
    use_crud::<Sale>()
}
