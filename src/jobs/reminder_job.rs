//! Booking reminder background job.
//!
//! Reminds a client about an upcoming appointment. Delivery goes through
//! the messenger bot; when no bot token is configured the reminder is
//! logged instead, which is what development environments want.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::env;

use crate::config::BOOKING_REMINDER_LEAD_HOURS;
use crate::errors::AppError;

/// Reminder job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingReminderJob {
    pub booking_id: i32,
    /// Recipient telegram id
    pub telegram_id: i64,
    pub master_name: String,
    pub service_title: String,
    /// ISO 8601 start of the appointment
    pub start_datetime: String,
}

impl BookingReminderJob {
    pub fn new(
        booking_id: i32,
        telegram_id: i64,
        master_name: impl Into<String>,
        service_title: impl Into<String>,
        start_datetime: impl Into<String>,
    ) -> Self {
        Self {
            booking_id,
            telegram_id,
            master_name: master_name.into(),
            service_title: service_title.into(),
            start_datetime: start_datetime.into(),
        }
    }

    /// When the reminder should fire: the lead time before the start,
    /// clamped to now for bookings made inside the lead window.
    pub fn run_at(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        let at = start - Duration::hours(BOOKING_REMINDER_LEAD_HOURS);
        at.max(now).timestamp()
    }

    fn message(&self) -> String {
        format!(
            "Reminder: {} with {} at {}",
            self.service_title, self.master_name, self.start_datetime
        )
    }
}

/// Reminder job handler - delivers booking reminders
pub async fn reminder_job_handler(job: BookingReminderJob) -> Result<(), AppError> {
    tracing::info!(
        booking_id = job.booking_id,
        telegram_id = job.telegram_id,
        "Processing booking reminder"
    );

    let bot_token = env::var("BOT_TOKEN").ok().filter(|t| !t.is_empty());

    let Some(token) = bot_token else {
        tracing::warn!("BOT_TOKEN not configured - logging reminder instead of sending");
        tracing::info!(
            telegram_id = job.telegram_id,
            message = %job.message(),
            "=== REMINDER (not sent) ==="
        );
        return Ok(());
    };

    let url = format!("https://api.telegram.org/bot{}/sendMessage", token);
    let response = reqwest::Client::new()
        .post(&url)
        .json(&serde_json::json!({
            "chat_id": job.telegram_id,
            "text": job.message(),
        }))
        .send()
        .await
        .map_err(|e| AppError::internal(format!("Reminder delivery failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::internal(format!(
            "Reminder delivery returned {}",
            response.status()
        )));
    }

    tracing::info!(booking_id = job.booking_id, "Reminder delivered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reminder_fires_a_day_before_the_start() {
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 9, 5, 14, 0, 0).unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 9, 4, 14, 0, 0).unwrap();
        assert_eq!(BookingReminderJob::run_at(start, now), expected.timestamp());
    }

    #[test]
    fn test_reminder_inside_lead_window_fires_immediately() {
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
        let start = Utc.with_ymd_and_hms(2026, 9, 1, 13, 0, 0).unwrap();
        assert_eq!(BookingReminderJob::run_at(start, now), now.timestamp());
    }
}
