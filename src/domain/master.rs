//! Master account entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{SUBSCRIPTION_FREE, SUBSCRIPTION_PREMIUM};
use crate::domain::{ServiceResponse, WorkPeriodResponse};

/// Subscription levels for master accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionLevel {
    Free,
    Premium,
}

impl SubscriptionLevel {
    pub fn is_premium(&self) -> bool {
        matches!(self, SubscriptionLevel::Premium)
    }
}

impl From<&str> for SubscriptionLevel {
    fn from(s: &str) -> Self {
        match s {
            SUBSCRIPTION_PREMIUM => SubscriptionLevel::Premium,
            _ => SubscriptionLevel::Free,
        }
    }
}

impl std::fmt::Display for SubscriptionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionLevel::Premium => write!(f, "{}", SUBSCRIPTION_PREMIUM),
            SubscriptionLevel::Free => write!(f, "{}", SUBSCRIPTION_FREE),
        }
    }
}

/// Master account domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterAccount {
    pub id: i32,
    pub telegram_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub city_id: Option<i32>,
    /// ISO 4217 currency the master's prices are quoted in
    pub currency: String,
    pub subscription_level: SubscriptionLevel,
    pub subscription_expires_at: Option<DateTime<Utc>>,
    pub is_blocked: bool,
    pub blocked_at: Option<DateTime<Utc>>,
    pub block_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MasterAccount {
    /// Check whether the premium subscription is currently active.
    pub fn has_active_premium(&self, now: DateTime<Utc>) -> bool {
        self.subscription_level.is_premium()
            && self.subscription_expires_at.map_or(false, |exp| exp > now)
    }

    /// Blocked masters are hidden from discovery and cannot take bookings.
    pub fn accepts_bookings(&self) -> bool {
        !self.is_blocked
    }
}

/// Master summary returned in list endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MasterResponse {
    pub id: i32,
    #[schema(example = "Anna")]
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    #[schema(example = "Москва")]
    pub city_name: Option<String>,
    /// Number of active services this master offers
    pub services_count: u64,
}

/// Master detail with services and weekly schedule
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MasterDetailResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub city: Option<String>,
    pub services: Vec<ServiceResponse>,
    pub work_schedule: Vec<WorkPeriodResponse>,
}
