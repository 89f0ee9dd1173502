//! Work schedule repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::entities::work_period::{self, Entity as WorkPeriodEntity};
use crate::domain::WorkPeriod;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Schedule repository trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// All work periods of a master, ordered by weekday then start time
    async fn periods_for_master(&self, master_id: i32) -> AppResult<Vec<WorkPeriod>>;
}

/// Concrete implementation of ScheduleRepository
pub struct ScheduleStore {
    db: DatabaseConnection,
}

impl ScheduleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScheduleRepository for ScheduleStore {
    async fn periods_for_master(&self, master_id: i32) -> AppResult<Vec<WorkPeriod>> {
        let models = WorkPeriodEntity::find()
            .filter(work_period::Column::MasterAccountId.eq(master_id))
            .order_by_asc(work_period::Column::Weekday)
            .order_by_asc(work_period::Column::StartTime)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(WorkPeriod::from).collect())
    }
}
