//! Producer-side handle to the background job queue.
//!
//! The API process schedules jobs; the `jobs work` process consumes them.
//! Both share the apalis tables in Postgres.

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use async_trait::async_trait;

use crate::errors::{AppError, AppResult};
use crate::jobs::BookingReminderJob;

/// Job queue trait for dependency injection.
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Schedule a booking reminder to run at the given unix timestamp.
    async fn schedule_reminder(&self, job: BookingReminderJob, run_at: i64) -> AppResult<()>;
}

/// apalis-backed queue shared with the worker process.
pub struct PostgresQueue {
    storage: PostgresStorage<BookingReminderJob>,
}

impl PostgresQueue {
    pub fn new(storage: PostgresStorage<BookingReminderJob>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl JobQueue for PostgresQueue {
    async fn schedule_reminder(&self, job: BookingReminderJob, run_at: i64) -> AppResult<()> {
        let mut storage = self.storage.clone();
        storage
            .schedule(job, run_at)
            .await
            .map_err(|e| AppError::internal(format!("Failed to schedule reminder: {}", e)))?;
        Ok(())
    }
}
