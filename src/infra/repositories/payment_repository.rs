//! Payment repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::payment::{self, ActiveModel, Entity as PaymentEntity};
use crate::config::error_messages;
use crate::domain::{Payment, PaymentStatus};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(test)]
use mockall::automock;

/// Fields needed to record a freshly created provider payment
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub master_account_id: i32,
    pub provider_payment_id: String,
    pub idempotence_key: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub confirmation_url: Option<String>,
}

/// Payment repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Find payment by local ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Payment>>;

    /// Find payment by provider-side ID
    async fn find_by_provider_id(&self, provider_payment_id: &str) -> AppResult<Option<Payment>>;

    /// Record a payment created at the provider
    async fn create(&self, new: NewPayment) -> AppResult<Payment>;

    /// Update the status after polling the provider
    async fn update_status(&self, id: i32, status: PaymentStatus) -> AppResult<Payment>;
}

/// Concrete implementation of PaymentRepository
pub struct PaymentStore {
    db: DatabaseConnection,
}

impl PaymentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PaymentRepository for PaymentStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Payment>> {
        let result = PaymentEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Payment::from))
    }

    async fn find_by_provider_id(&self, provider_payment_id: &str) -> AppResult<Option<Payment>> {
        let result = PaymentEntity::find()
            .filter(payment::Column::ProviderPaymentId.eq(provider_payment_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Payment::from))
    }

    async fn create(&self, new: NewPayment) -> AppResult<Payment> {
        let now = Utc::now();
        let active = ActiveModel {
            master_account_id: Set(new.master_account_id),
            provider_payment_id: Set(new.provider_payment_id),
            idempotence_key: Set(new.idempotence_key),
            amount: Set(new.amount),
            currency: Set(new.currency),
            status: Set(new.status.as_str().to_string()),
            confirmation_url: Set(new.confirmation_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Payment::from(model))
    }

    async fn update_status(&self, id: i32, status: PaymentStatus) -> AppResult<Payment> {
        let existing = PaymentEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(error_messages::PAYMENT_NOT_FOUND)?;

        let mut active: ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(Payment::from(model))
    }
}
