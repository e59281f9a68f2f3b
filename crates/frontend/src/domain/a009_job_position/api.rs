use contracts::domain::a009_job_position::aggregate::JobPosition;

use crate::shared::api::{use_crud, CrudService};

pub type JobPositionService = CrudService<JobPosition>;

pub fn use_service() -> JobPositionService {
    use_crud::<JobPosition>()
}
