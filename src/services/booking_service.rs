//! Booking service: slot listing, creation, and cancellation.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::Arc;

use crate::config::{error_messages, DEFAULT_CURRENCY, MIN_BOOKING_LEAD_MINS};
use crate::domain::slots::{available_slots, intervals_overlap, Slot};
use crate::domain::{BookingResponse, Service};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{
    BookingRepository, Cache, CatalogRepository, ClientRepository, MasterRepository, NewBooking,
    ScheduleRepository,
};
use crate::jobs::{BookingReminderJob, JobQueue};

/// Booking service trait for dependency injection.
#[async_trait]
pub trait BookingService: Send + Sync {
    /// Free start times for a service on a date
    async fn slots(&self, master_id: i32, service_id: i32, date: NaiveDate)
        -> AppResult<Vec<Slot>>;

    /// Create a booking at the given start time
    async fn create(
        &self,
        client_id: i32,
        service_id: i32,
        start: DateTime<Utc>,
        comment: Option<String>,
    ) -> AppResult<BookingResponse>;

    /// Cancel a booking owned by the client
    async fn cancel(&self, client_id: i32, booking_id: i32) -> AppResult<()>;

    /// Upcoming bookings of the client, soonest first
    async fn my_bookings(&self, client_id: i32) -> AppResult<Vec<BookingResponse>>;
}

/// Concrete implementation of BookingService
pub struct BookingManager {
    bookings: Arc<dyn BookingRepository>,
    catalog: Arc<dyn CatalogRepository>,
    masters: Arc<dyn MasterRepository>,
    schedule: Arc<dyn ScheduleRepository>,
    clients: Arc<dyn ClientRepository>,
    queue: Arc<dyn JobQueue>,
    cache: Cache,
}

impl BookingManager {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        catalog: Arc<dyn CatalogRepository>,
        masters: Arc<dyn MasterRepository>,
        schedule: Arc<dyn ScheduleRepository>,
        clients: Arc<dyn ClientRepository>,
        queue: Arc<dyn JobQueue>,
        cache: Cache,
    ) -> Self {
        Self {
            bookings,
            catalog,
            masters,
            schedule,
            clients,
            queue,
            cache,
        }
    }

    /// Schedule the reminder for a freshly created booking. The booking is
    /// already persisted, so a queue hiccup is logged rather than bubbled
    /// up to the client.
    async fn schedule_reminder(
        &self,
        client_id: i32,
        response: &BookingResponse,
        start: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        let telegram_id = match self.clients.find_by_id(client_id).await {
            Ok(Some(client)) => client.telegram_id,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!(client_id, error = %e, "Client lookup for reminder failed");
                return;
            }
        };

        let job = BookingReminderJob::new(
            response.id,
            telegram_id,
            response.master_name.clone(),
            response.service_title.clone(),
            response.start_datetime.clone(),
        );
        let run_at = BookingReminderJob::run_at(start, now);

        if let Err(e) = self.queue.schedule_reminder(job, run_at).await {
            tracing::warn!(
                booking_id = response.id,
                error = %e,
                "Failed to schedule booking reminder"
            );
        }
    }

    /// Load an active service and verify its master takes bookings.
    async fn bookable_service(&self, service_id: i32) -> AppResult<Service> {
        let service = self
            .catalog
            .find_service(service_id)
            .await?
            .filter(|s| s.active)
            .ok_or_not_found(error_messages::SERVICE_NOT_FOUND)?;

        let master = self
            .masters
            .find_by_id(service.master_account_id)
            .await?
            .ok_or_not_found(error_messages::MASTER_NOT_FOUND)?;

        if !master.accepts_bookings() {
            return Err(AppError::BadRequest(
                error_messages::MASTER_BLOCKED.to_string(),
            ));
        }

        Ok(service)
    }

    async fn to_response(&self, booking: crate::domain::Booking) -> AppResult<BookingResponse> {
        let (master_name, currency) = self
            .masters
            .find_by_id(booking.master_account_id)
            .await?
            .map(|m| (m.name, m.currency))
            .unwrap_or_else(|| (String::new(), DEFAULT_CURRENCY.to_string()));
        let service_title = self
            .catalog
            .find_service(booking.service_id)
            .await?
            .map(|s| s.title)
            .unwrap_or_default();

        Ok(BookingResponse::new(
            &booking,
            master_name,
            service_title,
            &currency,
        ))
    }
}

#[async_trait]
impl BookingService for BookingManager {
    async fn slots(
        &self,
        master_id: i32,
        service_id: i32,
        date: NaiveDate,
    ) -> AppResult<Vec<Slot>> {
        let service = self.bookable_service(service_id).await?;
        if service.master_account_id != master_id {
            return Err(AppError::not_found(error_messages::SERVICE_NOT_FOUND));
        }

        let periods = self.schedule.periods_for_master(master_id).await?;

        // Neighbouring bookings can shade into the day through their
        // buffers, so the busy window extends a day on both sides
        let day_start = date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        let day_start = day_start.ok_or_else(|| AppError::validation("Invalid date"))?;
        let busy = self
            .bookings
            .busy_intervals(
                master_id,
                day_start - Duration::days(1),
                day_start + Duration::days(2),
            )
            .await?;

        Ok(available_slots(
            &periods,
            &busy,
            date,
            service.duration_mins,
            service.cooling_period_mins,
            Utc::now(),
        ))
    }

    async fn create(
        &self,
        client_id: i32,
        service_id: i32,
        start: DateTime<Utc>,
        comment: Option<String>,
    ) -> AppResult<BookingResponse> {
        let service = self.bookable_service(service_id).await?;
        let master_id = service.master_account_id;

        let now = Utc::now();
        if start < now + Duration::minutes(MIN_BOOKING_LEAD_MINS) {
            return Err(AppError::validation(
                "Bookings must start at least an hour from now",
            ));
        }

        let end = start + Duration::minutes(i64::from(service.duration_mins));
        let buffer = Duration::minutes(i64::from(service.cooling_period_mins));

        // Serialize writers per master; losing the lock means someone else
        // is booking this master right now
        let lock = self
            .cache
            .try_lock_master(master_id)
            .await?
            .ok_or(AppError::SlotTaken)?;

        let busy = self
            .bookings
            .busy_intervals(master_id, start - Duration::days(1), end + Duration::days(1))
            .await?;

        let conflict = busy
            .iter()
            .any(|b| intervals_overlap(start - buffer, end + buffer, b.start, b.end));
        if conflict {
            return Err(AppError::SlotTaken);
        }

        let booking = self
            .bookings
            .create(NewBooking {
                client_id,
                master_account_id: master_id,
                service_id,
                start_dt: start,
                end_dt: end,
                price: service.price,
                comment,
            })
            .await?;

        lock.release().await?;

        tracing::info!(
            booking_id = booking.id,
            master_id,
            client_id,
            start = %booking.start_dt,
            "Booking created"
        );

        let response = self.to_response(booking).await?;
        self.schedule_reminder(client_id, &response, start, now).await;

        Ok(response)
    }

    async fn cancel(&self, client_id: i32, booking_id: i32) -> AppResult<()> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .filter(|b| b.client_id == client_id)
            .ok_or_not_found(error_messages::BOOKING_NOT_FOUND)?;

        booking
            .can_cancel(Utc::now())
            .map_err(|msg| AppError::BadRequest(msg.to_string()))?;

        self.bookings.delete(booking_id).await?;

        tracing::info!(booking_id, client_id, "Booking cancelled");
        Ok(())
    }

    async fn my_bookings(&self, client_id: i32) -> AppResult<Vec<BookingResponse>> {
        let bookings = self.bookings.upcoming_for_client(client_id).await?;

        let mut responses = Vec::with_capacity(bookings.len());
        for booking in bookings {
            responses.push(self.to_response(booking).await?);
        }
        Ok(responses)
    }
}
