use contracts::domain::a002_hierarchical_level::aggregate::HierarchicalLevel;

use crate::shared::api::{use_crud, CrudService};

pub type HierarchicalLevelService = CrudService<HierarchicalLevel>;

pub fn use_service() -> HierarchicalLevelService {
    use_crud::<HierarchicalLevel>()
}
