use contracts::domain::a005_labor_risk::aggregate::LaborRisk;

use crate::shared::api::{use_crud, CrudService};

pub type LaborRiskService = CrudService<LaborRisk>;

pub fn use_service() -> LaborRiskService {
    use_crud::<LaborRisk>()
}
