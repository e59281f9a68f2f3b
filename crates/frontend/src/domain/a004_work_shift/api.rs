use contracts::domain::a004_work_shift::aggregate::WorkShift;

use crate::shared::api::{use_crud, CrudService};

pub type WorkShiftService = CrudService<WorkShift>;

pub fn use_service() -> WorkShiftService {
    use_crud::<WorkShift>()
}
