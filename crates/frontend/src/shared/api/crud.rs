use std::marker::PhantomData;
use std::sync::Arc;

use contracts::domain::common::ErpEntity;
use contracts::shared::error::ApiError;
use leptos::prelude::*;

use super::http;
use crate::config::{resource_url, AppConfig};

/// REST client of one entity over `T::base_path()`.
///
/// `GET {base}`, `GET {base}/{id}`, `POST {base}`, `PUT {base}/{id}`,
/// `DELETE {base}/{id}` and the per-customer `GET {base}/customer/{id}`.
pub struct CrudService<T> {
    api_base: Arc<str>,
    organization_id: Option<i64>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for CrudService<T> {
    fn clone(&self) -> Self {
        Self {
            api_base: Arc::clone(&self.api_base),
            organization_id: self.organization_id,
            _entity: PhantomData,
        }
    }
}

impl<T: ErpEntity> CrudService<T> {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_base: Arc::from(config.api_base_url.as_str()),
            organization_id: config.organization_id,
            _entity: PhantomData,
        }
    }

    pub fn url(&self, path: Option<&str>, id: Option<i64>) -> String {
        resource_url(&self.api_base, T::base_path(), path, id)
    }

    pub async fn get_all(&self) -> Result<Vec<T>, ApiError> {
        // An empty collection may come back as 404 or without data.
        Ok(http::get_optional::<Vec<T>>(&self.url(None, None))
            .await?
            .unwrap_or_default())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<T, ApiError> {
        http::get(&self.url(None, Some(id))).await
    }

    /// Sub-resources listed per customer; 404 means none yet.
    pub async fn get_by_customer(&self, customer_id: i64) -> Result<Vec<T>, ApiError> {
        Ok(http::get_optional::<Vec<T>>(&self.url(Some("customer"), Some(customer_id)))
            .await?
            .unwrap_or_default())
    }

    /// Sub-resource with at most one record per customer; 404 means `None`.
    pub async fn get_one_by_customer(&self, customer_id: i64) -> Result<Option<T>, ApiError> {
        http::get_optional(&self.url(Some("customer"), Some(customer_id))).await
    }

    /// Records hanging from another resource, e.g. `GET /Payment/sale/{id}`.
    pub async fn get_by_parent(&self, parent: &str, parent_id: i64) -> Result<Vec<T>, ApiError> {
        Ok(http::get_optional::<Vec<T>>(&self.url(Some(parent), Some(parent_id)))
            .await?
            .unwrap_or_default())
    }

    /// Validates, stamps the organization and posts. Returns the stored record
    /// (the submitted one when the server echoes no data).
    pub async fn create(&self, entity: &T) -> Result<T, ApiError> {
        entity.validate().map_err(ApiError::Validation)?;
        let mut body = entity.clone();
        body.set_id(None);
        if self.organization_id.is_some() {
            body.set_organization_id(self.organization_id);
        }
        let created = http::post::<T, T>(&self.url(None, None), &body).await?;
        Ok(created.unwrap_or(body))
    }

    pub async fn update(&self, entity: &T) -> Result<T, ApiError> {
        let id = entity
            .id()
            .ok_or_else(|| ApiError::Validation("El registro aún no ha sido guardado".into()))?;
        entity.validate().map_err(ApiError::Validation)?;
        let updated = http::put::<T, T>(&self.url(None, Some(id)), entity).await?;
        Ok(updated.unwrap_or_else(|| entity.clone()))
    }

    /// Create or update depending on whether the record has an id.
    pub async fn save(&self, entity: &T) -> Result<T, ApiError> {
        if entity.id().is_some() {
            self.update(entity).await
        } else {
            self.create(entity).await
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        http::delete(&self.url(None, Some(id))).await
    }

    /// Deletes one by one, in order. Returns (deleted, failed).
    pub async fn delete_many(&self, ids: &[i64]) -> (usize, usize) {
        let mut deleted = 0;
        let mut failed = 0;
        for id in ids {
            match self.delete(*id).await {
                Ok(()) => deleted += 1,
                Err(e) => {
                    log::warn!("{} {}: delete failed: {}", T::full_name(), id, e);
                    failed += 1;
                }
            }
        }
        (deleted, failed)
    }
}

/// Service for `T` bound to the `AppConfig` in context.
pub fn use_crud<T: ErpEntity>() -> CrudService<T> {
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");
    CrudService::new(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a011_customer_delivery_address::aggregate::CustomerDeliveryAddress;
    use contracts::domain::a017_payment::aggregate::Payment;

    fn config() -> AppConfig {
        AppConfig {
            api_base_url: "http://localhost:5000/api".into(),
            organization_id: Some(1),
            iva_rate: 0.16,
        }
    }

    #[test]
    fn builds_entity_urls() {
        let addresses = CrudService::<CustomerDeliveryAddress>::new(&config());
        assert_eq!(
            addresses.url(None, None),
            "http://localhost:5000/api/CustomerDeliveryAddress"
        );
        assert_eq!(
            addresses.url(Some("customer"), Some(8)),
            "http://localhost:5000/api/CustomerDeliveryAddress/customer/8"
        );

        let payments = CrudService::<Payment>::new(&config());
        assert_eq!(
            payments.url(Some("sale"), Some(3)),
            "http://localhost:5000/api/Payment/sale/3"
        );
    }
}
