//! City directory service with Redis-backed caching.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{error_messages, DEFAULT_CURRENCY};
use crate::domain::currency::currency_for_country;
use crate::domain::CityResponse;
use crate::errors::{AppResult, OptionExt};
use crate::infra::{Cache, CityRepository};

/// City directory trait for dependency injection.
#[async_trait]
pub trait CityService: Send + Sync {
    /// List cities, optionally filtered by country code
    async fn list_cities(&self, country_code: Option<String>) -> AppResult<Vec<CityResponse>>;

    /// Currency charged in a city, preferring stored country overrides
    /// over the static mapping
    async fn currency_for(&self, city_id: i32) -> AppResult<String>;
}

/// Concrete implementation of CityService
pub struct CityDirectory {
    cities: Arc<dyn CityRepository>,
    cache: Cache,
}

impl CityDirectory {
    pub fn new(cities: Arc<dyn CityRepository>, cache: Cache) -> Self {
        Self { cities, cache }
    }
}

#[async_trait]
impl CityService for CityDirectory {
    async fn list_cities(&self, country_code: Option<String>) -> AppResult<Vec<CityResponse>> {
        let filter = country_code
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| "all".to_string());

        // The directory changes rarely, so a cache miss is cheap to refill
        if let Some(cached) = self.cache.get_cities(&filter).await? {
            return Ok(cached);
        }

        let cities = self.cities.list(country_code).await?;
        let responses: Vec<CityResponse> = cities.into_iter().map(CityResponse::from).collect();

        if let Err(e) = self.cache.set_cities(&filter, &responses).await {
            tracing::warn!(error = %e, "Failed to cache city list");
        }

        Ok(responses)
    }

    async fn currency_for(&self, city_id: i32) -> AppResult<String> {
        let city = self
            .cities
            .find_by_id(city_id)
            .await?
            .ok_or_not_found(error_messages::CITY_NOT_FOUND)?;

        let Some(country) = city.country_code else {
            return Ok(DEFAULT_CURRENCY.to_string());
        };

        if let Some(stored) = self.cities.currency_override(&country).await? {
            return Ok(stored);
        }
        Ok(currency_for_country(&country).to_string())
    }
}
