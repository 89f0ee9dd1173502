//! City directory repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::entities::city::{self, Entity as CityEntity};
use super::entities::country_currency::Entity as CountryCurrencyEntity;
use crate::domain::City;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// City repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CityRepository: Send + Sync {
    /// List cities, optionally filtered by country code, ordered by Russian name
    async fn list(&self, country_code: Option<String>) -> AppResult<Vec<City>>;

    /// Find city by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<City>>;

    /// Look up a currency override for a country, if one is stored
    async fn currency_override(&self, country_code: &str) -> AppResult<Option<String>>;
}

/// Concrete implementation of CityRepository
pub struct CityStore {
    db: DatabaseConnection,
}

impl CityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CityRepository for CityStore {
    async fn list(&self, country_code: Option<String>) -> AppResult<Vec<City>> {
        let mut query = CityEntity::find().order_by_asc(city::Column::NameRu);
        if let Some(code) = country_code {
            query = query.filter(city::Column::CountryCode.eq(code.to_uppercase()));
        }

        let models = query.all(&self.db).await.map_err(AppError::from)?;
        Ok(models.into_iter().map(City::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<City>> {
        let result = CityEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(City::from))
    }

    async fn currency_override(&self, country_code: &str) -> AppResult<Option<String>> {
        let result = CountryCurrencyEntity::find_by_id(country_code.to_uppercase())
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(|m| m.currency_code))
    }
}
