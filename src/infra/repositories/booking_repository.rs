//! Booking repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use std::collections::HashMap;

use super::entities::booking::{self, ActiveModel, Entity as BookingEntity};
use super::entities::service::Entity as ServiceEntity;
use crate::domain::slots::BusyInterval;
use crate::domain::Booking;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Fields needed to insert a booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub client_id: i32,
    pub master_account_id: i32,
    pub service_id: i32,
    pub start_dt: DateTime<Utc>,
    pub end_dt: DateTime<Utc>,
    pub price: f64,
    pub comment: Option<String>,
}

/// Booking repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find booking by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Booking>>;

    /// Upcoming bookings of a client, soonest first
    async fn upcoming_for_client(&self, client_id: i32) -> AppResult<Vec<Booking>>;

    /// A master's busy intervals inside a window, each widened by the
    /// booked service's cooling period
    async fn busy_intervals(
        &self,
        master_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<BusyInterval>>;

    /// Insert a new booking
    async fn create(&self, new: NewBooking) -> AppResult<Booking>;

    /// Delete a booking. Returns false when it did not exist.
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Count all bookings
    async fn count_all(&self) -> AppResult<u64>;
}

/// Concrete implementation of BookingRepository
pub struct BookingStore {
    db: DatabaseConnection,
}

impl BookingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for BookingStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Booking>> {
        let result = BookingEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Booking::from))
    }

    async fn upcoming_for_client(&self, client_id: i32) -> AppResult<Vec<Booking>> {
        let models = BookingEntity::find()
            .filter(booking::Column::ClientId.eq(client_id))
            .filter(booking::Column::StartDt.gte(Utc::now()))
            .order_by_asc(booking::Column::StartDt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Booking::from).collect())
    }

    async fn busy_intervals(
        &self,
        master_id: i32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<BusyInterval>> {
        let models = BookingEntity::find()
            .filter(booking::Column::MasterAccountId.eq(master_id))
            .filter(booking::Column::StartDt.lt(to))
            .filter(booking::Column::EndDt.gt(from))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        if models.is_empty() {
            return Ok(Vec::new());
        }

        // Resolve each booked service's cooling period so the interval
        // carries its buffer
        let service_ids: Vec<i32> = models.iter().map(|m| m.service_id).collect();
        let coolings: HashMap<i32, i32> = ServiceEntity::find()
            .filter(super::entities::service::Column::Id.is_in(service_ids))
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|s| (s.id, s.cooling_period_mins))
            .collect();

        Ok(models
            .into_iter()
            .map(|m| {
                let cooling = coolings.get(&m.service_id).copied().unwrap_or(0);
                BusyInterval::from_booking(m.start_dt, m.end_dt, cooling)
            })
            .collect())
    }

    async fn create(&self, new: NewBooking) -> AppResult<Booking> {
        let active = ActiveModel {
            client_id: Set(new.client_id),
            master_account_id: Set(new.master_account_id),
            service_id: Set(new.service_id),
            start_dt: Set(new.start_dt),
            end_dt: Set(new.end_dt),
            price: Set(new.price),
            comment: Set(new.comment),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Booking::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = BookingEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }

    async fn count_all(&self) -> AppResult<u64> {
        BookingEntity::find()
            .count(&self.db)
            .await
            .map_err(Into::into)
    }
}
