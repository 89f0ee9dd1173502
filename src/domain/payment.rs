//! Payment entity for premium subscription purchases.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Lifecycle of a payment at the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Canceled,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Canceled => "canceled",
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(s: &str) -> Self {
        match s {
            "succeeded" => PaymentStatus::Succeeded,
            "canceled" => PaymentStatus::Canceled,
            _ => PaymentStatus::Pending,
        }
    }
}

/// A payment initiated with the provider.
///
/// `provider_payment_id` is the provider-side identifier used to poll
/// status; `idempotence_key` guards against duplicate charges on retry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i32,
    pub master_account_id: i32,
    pub provider_payment_id: String,
    pub idempotence_key: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    /// URL the payer is redirected to for confirmation
    pub confirmation_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn is_final(&self) -> bool {
        !matches!(self.status, PaymentStatus::Pending)
    }
}
