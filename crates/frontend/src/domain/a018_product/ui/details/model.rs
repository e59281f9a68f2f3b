use contracts::domain::a018_product::aggregate::Product;
use contracts::shared::error::ApiError;

use crate::domain::a018_product::api::ProductService;

pub async fn fetch_by_id(service: &ProductService, id: i64) -> Result<Product, ApiError> {
    service.get_by_id(id).await
}

/// Uppercases the SKU before create/update.
pub async fn save(service: &ProductService, product: &Product) -> Result<Product, ApiError> {
    let mut product = product.clone();
    product.sku = product.sku.trim().to_uppercase();
    service.save(&product).await
}
