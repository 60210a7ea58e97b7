//! Daily shutdown scheduling core.
//!
//! This crate provides:
//! - Time-of-day parsing and next-occurrence resolution (daily rollover)
//! - Notification plan derivation from a target instant and lead times
//! - The [`ScheduleController`] owning the live set of timer handles,
//!   with atomic validate-then-swap rescheduling
//! - The [`TimerDriver`] seam over the host's deferred-callback facility,
//!   with a tokio-backed implementation

pub mod controller;
pub mod dispatch;
pub mod error;
pub mod plan;
pub mod resolver;
pub mod timer;

pub use controller::{ActiveSchedule, ScheduleController};
pub use dispatch::Dispatch;
pub use error::ScheduleError;
pub use plan::{build_plan, NotificationFiring};
pub use resolver::{parse_time_of_day, resolve_next};
pub use timer::{TimerDriver, TimerHandle, TokioTimers};
