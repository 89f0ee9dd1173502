//! Weekly work schedule entity.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::slots::format_time;

/// One working interval of a master on a given weekday.
///
/// Weekdays follow the original scheme: 0 = Monday .. 6 = Sunday.
/// Times are stored to the minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPeriod {
    pub id: i32,
    pub master_account_id: i32,
    pub weekday: u8,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Work period as exposed by the API ("HH:MM" strings)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkPeriodResponse {
    /// 0 = Monday .. 6 = Sunday
    #[schema(example = 0)]
    pub weekday: u8,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "18:00")]
    pub end_time: String,
}

impl From<WorkPeriod> for WorkPeriodResponse {
    fn from(period: WorkPeriod) -> Self {
        Self {
            weekday: period.weekday,
            start_time: format_time(period.start),
            end_time: format_time(period.end),
        }
    }
}
