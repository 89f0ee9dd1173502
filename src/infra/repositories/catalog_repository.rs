//! Service catalog repository: services, categories, and portfolios.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

use super::entities::portfolio_photo::{self, Entity as PortfolioEntity};
use super::entities::service::{self, Entity as ServiceEntity};
use super::entities::service_category::{self, Entity as CategoryEntity};
use crate::domain::{PortfolioPhoto, Service, ServiceCategory};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Catalog repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Find a service by ID
    async fn find_service(&self, id: i32) -> AppResult<Option<Service>>;

    /// Active services of a master, in creation order
    async fn services_for_master(&self, master_id: i32) -> AppResult<Vec<Service>>;

    /// Count active services per master, for the given masters
    async fn service_counts(&self, master_ids: Vec<i32>) -> AppResult<HashMap<i32, u64>>;

    /// Categories of a master, keyed by ID
    async fn categories_for_master(&self, master_id: i32) -> AppResult<Vec<ServiceCategory>>;

    /// Portfolio photos of a service, in display order
    async fn portfolio_for_service(&self, service_id: i32) -> AppResult<Vec<PortfolioPhoto>>;
}

/// Concrete implementation of CatalogRepository
pub struct CatalogStore {
    db: DatabaseConnection,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for CatalogStore {
    async fn find_service(&self, id: i32) -> AppResult<Option<Service>> {
        let result = ServiceEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Service::from))
    }

    async fn services_for_master(&self, master_id: i32) -> AppResult<Vec<Service>> {
        let models = ServiceEntity::find()
            .filter(service::Column::MasterAccountId.eq(master_id))
            .filter(service::Column::Active.eq(true))
            .order_by_asc(service::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Service::from).collect())
    }

    async fn service_counts(&self, master_ids: Vec<i32>) -> AppResult<HashMap<i32, u64>> {
        if master_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let models = ServiceEntity::find()
            .filter(service::Column::MasterAccountId.is_in(master_ids))
            .filter(service::Column::Active.eq(true))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        let mut counts: HashMap<i32, u64> = HashMap::new();
        for model in models {
            *counts.entry(model.master_account_id).or_default() += 1;
        }
        Ok(counts)
    }

    async fn categories_for_master(&self, master_id: i32) -> AppResult<Vec<ServiceCategory>> {
        let models = CategoryEntity::find()
            .filter(service_category::Column::MasterAccountId.eq(master_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ServiceCategory::from).collect())
    }

    async fn portfolio_for_service(&self, service_id: i32) -> AppResult<Vec<PortfolioPhoto>> {
        let models = PortfolioEntity::find()
            .filter(portfolio_photo::Column::ServiceId.eq(service_id))
            .order_by_asc(portfolio_photo::Column::OrderIndex)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(PortfolioPhoto::from).collect())
    }
}
