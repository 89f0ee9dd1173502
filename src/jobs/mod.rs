//! Background jobs.

mod queue;
mod reminder_job;

pub use queue::{JobQueue, PostgresQueue};
pub use reminder_job::{reminder_job_handler, BookingReminderJob};
