//! Error type for schedule construction.

use thiserror::Error;

/// Errors that can occur while building a schedule from configuration.
///
/// Raised by [`schedule`](crate::ScheduleController::schedule) and
/// [`reschedule`](crate::ScheduleController::reschedule); a failed
/// reschedule leaves the prior schedule untouched.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// The configured shutdown time is not a valid `HH:MM:SS` string.
    #[error("malformed time-of-day {input:?}: {reason}")]
    InvalidTimeOfDay { input: String, reason: String },
}
