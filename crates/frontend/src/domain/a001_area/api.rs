use contracts::domain::a001_area::aggregate::Area;

use crate::shared::api::{use_crud, CrudService};

pub type AreaService = CrudService<Area>;

pub fn use_service() -> AreaService {
    use_crud::<Area>()
}
