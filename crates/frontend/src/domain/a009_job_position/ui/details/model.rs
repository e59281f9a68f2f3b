use contracts::domain::a009_job_position::aggregate::JobPosition;
use contracts::shared::error::ApiError;

use crate::domain::a009_job_position::api::JobPositionService;

pub async fn fetch_by_id(service: &JobPositionService, id: i64) -> Result<JobPosition, ApiError> {
    service.get_by_id(id).await
}

pub async fn save(
    service: &JobPositionService,
    position: &JobPosition,
) -> Result<JobPosition, ApiError> {
    service.save(position).await
}
