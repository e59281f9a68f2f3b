use contracts::domain::a010_customer::aggregate::Customer;
use contracts::shared::error::ApiError;

use crate::domain::a010_customer::api::CustomerService;

pub async fn fetch_by_id(service: &CustomerService, id: i64) -> Result<Customer, ApiError> {
    service.get_by_id(id).await
}

pub async fn save(service: &CustomerService, customer: &Customer) -> Result<Customer, ApiError> {
    let mut customer = customer.clone();
    customer.code = customer.code.trim().to_uppercase();
    service.save(&customer).await
}
