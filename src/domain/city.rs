//! City directory entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// City with names in three languages, used for master discovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: i32,
    pub name_ru: String,
    pub name_local: String,
    pub name_en: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// ISO 3166-1 alpha-2 country code, drives the master's default currency
    pub country_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// City response returned by the directory endpoints. Deserialize is
/// needed to read the cached copy back out of Redis.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CityResponse {
    pub id: i32,
    #[schema(example = "Москва")]
    pub name_ru: String,
    #[schema(example = "Москва")]
    pub name_local: String,
    #[schema(example = "Moscow")]
    pub name_en: String,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name_ru: city.name_ru,
            name_local: city.name_local,
            name_en: city.name_en,
        }
    }
}
