//! Slot computation engine.
//!
//! Turns a master's weekly work periods and existing bookings into the
//! concrete start times a client can pick for a service on a given date.
//! All rules live here so the booking service and the API handlers share
//! one source of truth:
//!
//! - candidate starts advance in steps of `max(SLOT_STEP_MINS, cooling)`;
//! - a slot must start at least `MIN_BOOKING_LEAD_MINS` from now;
//! - the service (plus its cooling buffer on both sides) must not overlap
//!   any existing booking, whose own buffers widen it symmetrically too.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{MIN_BOOKING_LEAD_MINS, SLOT_STEP_MINS};
use crate::domain::WorkPeriod;

/// Parse a "HH:MM" time string.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Format a time as "HH:MM".
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Half-open interval overlap check: `[s1, e1)` intersects `[s2, e2)`.
pub fn intervals_overlap(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && e1 > s2
}

/// Validate a prospective work period before it is stored.
///
/// The new period must be well-formed and must not overlap any of the
/// master's existing periods on the same weekday. `exclude_id` skips the
/// period being edited so it does not collide with itself.
pub fn validate_period(
    existing: &[WorkPeriod],
    weekday: u8,
    start: NaiveTime,
    end: NaiveTime,
    exclude_id: Option<i32>,
) -> Result<(), String> {
    if end <= start {
        return Err("End time must be after start time".to_string());
    }

    let clash = existing.iter().any(|p| {
        p.weekday == weekday && Some(p.id) != exclude_id && start < p.end && end > p.start
    });
    if clash {
        return Err("Period overlaps an existing work period".to_string());
    }

    Ok(())
}

/// An already-taken interval, widened by the cooling buffer of its service.
#[derive(Debug, Clone, Copy)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    /// Build from a booking's raw bounds, widening both sides by the
    /// booked service's cooling period.
    pub fn from_booking(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        cooling_mins: i32,
    ) -> Self {
        let buffer = Duration::minutes(i64::from(cooling_mins));
        Self {
            start: start - buffer,
            end: end + buffer,
        }
    }
}

/// A bookable start time offered to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Slot {
    /// "HH:MM" local start time
    #[schema(example = "10:30")]
    pub start_time: String,
    /// ISO 8601 start datetime
    #[schema(example = "2026-09-01T10:30:00Z")]
    pub start_datetime: String,
}

/// Compute the free start times for `date` given the master's weekly
/// `periods` and the day's `busy` intervals.
///
/// `duration_mins` and `cooling_mins` describe the service being booked.
/// The new booking reserves its own buffer too, so both sides of the
/// candidate interval are widened before the overlap check.
pub fn available_slots(
    periods: &[WorkPeriod],
    busy: &[BusyInterval],
    date: NaiveDate,
    duration_mins: i32,
    cooling_mins: i32,
    now: DateTime<Utc>,
) -> Vec<Slot> {
    let weekday = date.weekday().num_days_from_monday() as u8;
    let duration = Duration::minutes(i64::from(duration_mins));
    let buffer = Duration::minutes(i64::from(cooling_mins));
    let step = Duration::minutes(SLOT_STEP_MINS.max(i64::from(cooling_mins)));
    let earliest = now + Duration::minutes(MIN_BOOKING_LEAD_MINS);

    let mut slots = Vec::new();
    for period in periods.iter().filter(|p| p.weekday == weekday) {
        let mut cursor = date.and_time(period.start).and_utc();
        let period_end = date.and_time(period.end).and_utc();
        loop {
            let slot_end = cursor + duration;
            if slot_end > period_end {
                break;
            }
            let fits = cursor >= earliest
                && !busy.iter().any(|b| {
                    intervals_overlap(cursor - buffer, slot_end + buffer, b.start, b.end)
                });
            if fits {
                slots.push(Slot {
                    start_time: format_time(cursor.time()),
                    start_datetime: cursor.to_rfc3339(),
                });
            }
            cursor += step;
        }
    }
    slots.sort_by(|a, b| a.start_datetime.cmp(&b.start_datetime));
    slots
}

/// True when at least one slot exists on `date`. Used by discovery
/// endpoints that only need a yes/no answer.
pub fn has_available_slots(
    periods: &[WorkPeriod],
    busy: &[BusyInterval],
    date: NaiveDate,
    duration_mins: i32,
    cooling_mins: i32,
    now: DateTime<Utc>,
) -> bool {
    !available_slots(periods, busy, date, duration_mins, cooling_mins, now).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // 2026-09-01 is a Tuesday (weekday 1)
    fn tuesday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
    }

    fn period(weekday: u8, start: NaiveTime, end: NaiveTime) -> WorkPeriod {
        WorkPeriod {
            id: 1,
            master_account_id: 1,
            weekday,
            start,
            end,
        }
    }

    fn early_morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, 1, 5, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_and_format_time() {
        assert_eq!(parse_time("09:30"), Some(t(9, 30)));
        assert_eq!(parse_time("24:00"), None);
        assert_eq!(parse_time("garbage"), None);
        assert_eq!(format_time(t(9, 5)), "09:05");
    }

    #[test]
    fn test_validate_period_rejects_inverted() {
        assert!(validate_period(&[], 1, t(9, 0), t(18, 0), None).is_ok());
        assert!(validate_period(&[], 1, t(18, 0), t(9, 0), None).is_err());
        assert!(validate_period(&[], 1, t(9, 0), t(9, 0), None).is_err());
    }

    #[test]
    fn test_validate_period_rejects_overlap_on_same_weekday() {
        let existing = vec![period(1, t(11, 0), t(13, 0))];
        assert!(validate_period(&existing, 1, t(10, 0), t(12, 0), None).is_err());
        // other weekdays never clash
        assert!(validate_period(&existing, 2, t(10, 0), t(12, 0), None).is_ok());
        // touching periods are fine
        assert!(validate_period(&existing, 1, t(9, 0), t(11, 0), None).is_ok());
    }

    #[test]
    fn test_validate_period_excluded_id_allows_editing_in_place() {
        let existing = vec![period(1, t(11, 0), t(13, 0))];
        assert!(validate_period(&existing, 1, t(11, 0), t(14, 0), Some(1)).is_ok());
        assert!(validate_period(&existing, 1, t(11, 0), t(14, 0), Some(99)).is_err());
    }

    #[test]
    fn test_intervals_overlap_edges() {
        let d = |h| Utc.with_ymd_and_hms(2026, 9, 1, h, 0, 0).unwrap();
        assert!(intervals_overlap(d(10), d(12), d(11), d(13)));
        // touching intervals do not overlap
        assert!(!intervals_overlap(d(10), d(12), d(12), d(14)));
        assert!(!intervals_overlap(d(12), d(14), d(10), d(12)));
    }

    #[test]
    fn test_slots_fill_period_in_half_hour_steps() {
        let periods = vec![period(1, t(9, 0), t(11, 0))];
        let slots = available_slots(&periods, &[], tuesday(), 60, 0, early_morning());
        let starts: Vec<_> = slots.iter().map(|s| s.start_time.as_str()).collect();
        assert_eq!(starts, vec!["09:00", "09:30", "10:00"]);
    }

    #[test]
    fn test_slot_must_end_inside_period() {
        let periods = vec![period(1, t(9, 0), t(10, 0))];
        let slots = available_slots(&periods, &[], tuesday(), 90, 0, early_morning());
        assert!(slots.is_empty());
    }

    #[test]
    fn test_cooling_period_widens_step() {
        let periods = vec![period(1, t(9, 0), t(12, 0))];
        let slots = available_slots(&periods, &[], tuesday(), 60, 45, early_morning());
        let starts: Vec<_> = slots.iter().map(|s| s.start_time.as_str()).collect();
        // step becomes 45 minutes
        assert_eq!(starts, vec!["09:00", "09:45", "10:30"]);
    }

    #[test]
    fn test_existing_booking_blocks_overlapping_slots() {
        let periods = vec![period(1, t(9, 0), t(13, 0))];
        let busy = vec![BusyInterval::from_booking(
            Utc.with_ymd_and_hms(2026, 9, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 9, 1, 11, 0, 0).unwrap(),
            0,
        )];
        let slots = available_slots(&periods, &busy, tuesday(), 60, 0, early_morning());
        let starts: Vec<_> = slots.iter().map(|s| s.start_time.as_str()).collect();
        assert_eq!(starts, vec!["09:00", "11:00", "11:30", "12:00"]);
    }

    #[test]
    fn test_cooling_buffer_applies_on_both_sides() {
        let periods = vec![period(1, t(9, 0), t(13, 0))];
        let busy = vec![BusyInterval::from_booking(
            Utc.with_ymd_and_hms(2026, 9, 1, 10, 30, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 9, 1, 11, 0, 0).unwrap(),
            30,
        )];
        // busy widens to 10:00..11:30; candidate widens by its own 30-min
        // buffer, so 09:00 (ends 10:00, widened 08:30..10:30) collides too
        let slots = available_slots(&periods, &busy, tuesday(), 60, 30, early_morning());
        let starts: Vec<_> = slots.iter().map(|s| s.start_time.as_str()).collect();
        assert_eq!(starts, vec!["12:00"]);
    }

    #[test]
    fn test_minimum_lead_time_filters_near_slots() {
        let periods = vec![period(1, t(9, 0), t(11, 0))];
        let now = Utc.with_ymd_and_hms(2026, 9, 1, 8, 45, 0).unwrap();
        // earliest start is 09:45, so 09:00 and 09:30 drop out
        let slots = available_slots(&periods, &[], tuesday(), 60, 0, now);
        let starts: Vec<_> = slots.iter().map(|s| s.start_time.as_str()).collect();
        assert_eq!(starts, vec!["10:00"]);
    }

    #[test]
    fn test_other_weekdays_are_ignored() {
        let periods = vec![period(3, t(9, 0), t(18, 0))];
        let slots = available_slots(&periods, &[], tuesday(), 60, 0, early_morning());
        assert!(slots.is_empty());
    }

    #[test]
    fn test_has_available_slots() {
        let periods = vec![period(1, t(9, 0), t(11, 0))];
        assert!(has_available_slots(
            &periods,
            &[],
            tuesday(),
            60,
            0,
            early_morning()
        ));
        assert!(!has_available_slots(
            &periods,
            &[],
            tuesday(),
            180,
            0,
            early_morning()
        ));
    }
}
