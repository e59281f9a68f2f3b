use contracts::domain::a006_shift::aggregate::Shift;

use crate::shared::api::{use_crud, CrudService};

pub type ShiftService = CrudService<Shift>;

pub fn use_service() -> ShiftService {
    use_crud::<Shift>()
}
