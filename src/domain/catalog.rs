//! Service catalog entities: categories, services, and portfolio photos.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Service category, optionally one of the predefined set (nails, hair, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceCategory {
    pub id: i32,
    pub master_account_id: i32,
    pub title: String,
    pub emoji: Option<String>,
    pub is_predefined: bool,
    pub category_key: Option<String>,
}

/// A bookable service offered by a master
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i32,
    pub master_account_id: i32,
    pub category_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub duration_mins: i32,
    /// Buffer required around bookings of this service (cleanup, drying time)
    pub cooling_period_mins: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Portfolio photo attached to a service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioPhoto {
    pub id: i32,
    pub service_id: i32,
    /// Storage reference for the photo
    pub file_id: String,
    pub caption: Option<String>,
    pub order_index: i32,
}

/// Service returned by master detail endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: i32,
    #[schema(example = "Manicure")]
    pub title: String,
    pub description: Option<String>,
    #[schema(example = 1500.0)]
    pub price: f64,
    #[schema(example = 90)]
    pub duration_mins: i32,
    pub category_name: Option<String>,
    pub portfolio_photos: Vec<String>,
}

impl ServiceResponse {
    /// Assemble the response from a service, its resolved category name,
    /// and its portfolio photo references.
    pub fn new(
        service: Service,
        category_name: Option<String>,
        portfolio: Vec<PortfolioPhoto>,
    ) -> Self {
        Self {
            id: service.id,
            title: service.title,
            description: service.description,
            price: service.price,
            duration_mins: service.duration_mins,
            category_name,
            portfolio_photos: portfolio.into_iter().map(|p| p.file_id).collect(),
        }
    }
}
