//! Booking entity and API representation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{error_messages, CANCELLATION_CUTOFF_HOURS};
use crate::domain::currency::format_price;

/// A confirmed appointment between a client and a master
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i32,
    pub client_id: i32,
    pub master_account_id: i32,
    pub service_id: i32,
    pub start_dt: DateTime<Utc>,
    pub end_dt: DateTime<Utc>,
    /// Price captured at booking time; later service edits do not affect it
    pub price: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Cancellation is allowed only up to the cutoff before the start.
    pub fn can_cancel(&self, now: DateTime<Utc>) -> Result<(), &'static str> {
        if self.start_dt - now < Duration::hours(CANCELLATION_CUTOFF_HOURS) {
            return Err(error_messages::CANCELLATION_TOO_LATE);
        }
        Ok(())
    }
}

/// Booking returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: i32,
    #[schema(example = "Anna")]
    pub master_name: String,
    #[schema(example = "Manicure")]
    pub service_title: String,
    /// ISO 8601 start datetime
    #[schema(example = "2026-09-01T10:00:00Z")]
    pub start_datetime: String,
    /// ISO 8601 end datetime
    #[schema(example = "2026-09-01T11:30:00Z")]
    pub end_datetime: String,
    pub price: f64,
    /// Price rendered in the master's currency
    #[schema(example = "1500 ₽")]
    pub price_display: String,
    #[schema(example = "confirmed")]
    pub status: String,
}

impl BookingResponse {
    pub fn new(
        booking: &Booking,
        master_name: String,
        service_title: String,
        currency: &str,
    ) -> Self {
        Self {
            id: booking.id,
            master_name,
            service_title,
            start_datetime: booking.start_dt.to_rfc3339(),
            end_datetime: booking.end_dt.to_rfc3339(),
            price: booking.price,
            price_display: format_price(booking.price, currency),
            status: "confirmed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn booking_starting_at(start: DateTime<Utc>) -> Booking {
        Booking {
            id: 1,
            client_id: 1,
            master_account_id: 1,
            service_id: 1,
            start_dt: start,
            end_dt: start + Duration::minutes(60),
            price: 1500.0,
            comment: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_cancellation_allowed_before_cutoff() {
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
        let booking = booking_starting_at(now + Duration::hours(25));
        assert!(booking.can_cancel(now).is_ok());
    }

    #[test]
    fn test_cancellation_rejected_within_cutoff() {
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
        let booking = booking_starting_at(now + Duration::hours(23));
        assert!(booking.can_cancel(now).is_err());
    }

    #[test]
    fn test_cancellation_rejected_for_past_booking() {
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap();
        let booking = booking_starting_at(now - Duration::hours(1));
        assert!(booking.can_cancel(now).is_err());
    }
}
