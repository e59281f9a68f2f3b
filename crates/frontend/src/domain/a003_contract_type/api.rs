use contracts::domain::a003_contract_type::aggregate::ContractType;

use crate::shared::api::{use_crud, CrudService};

pub type ContractTypeService = CrudService<ContractType>;

pub fn use_service() -> ContractTypeService {
    use_crud::<ContractType>()
}
