//! The schedule controller: sole owner of the live firing set.
//!
//! Holds at most one [`ActiveSchedule`] (the terminal firing plus its
//! notification firings) and replaces it wholesale on reschedule. The
//! replacement is validate-then-swap: the incoming configuration is parsed
//! before any live handle is cancelled, so a broken config edit leaves the
//! previous schedule in force.

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, Utc};
use tracing::{debug, info};

use curfew_core::CurfewConfig;

use crate::dispatch::Dispatch;
use crate::error::ScheduleError;
use crate::plan::build_plan;
use crate::resolver::{parse_time_of_day, resolve_next};
use crate::timer::{TimerDriver, TimerHandle};

/// The live firing set for one configuration generation.
#[derive(Debug)]
pub struct ActiveSchedule {
    target: DateTime<Utc>,
    terminal: TimerHandle,
    notifications: Vec<TimerHandle>,
}

impl ActiveSchedule {
    /// The instant the terminal firing is scheduled for.
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Number of notification firings installed for this generation.
    pub fn notification_count(&self) -> usize {
        self.notifications.len()
    }
}

/// Owns and mutates the active schedule. Idle until [`schedule`] or
/// [`reschedule`] arms it.
///
/// [`schedule`]: ScheduleController::schedule
/// [`reschedule`]: ScheduleController::reschedule
pub struct ScheduleController {
    timers: Arc<dyn TimerDriver>,
    dispatch: Arc<dyn Dispatch>,
    active: Option<ActiveSchedule>,
}

impl ScheduleController {
    pub fn new(timers: Arc<dyn TimerDriver>, dispatch: Arc<dyn Dispatch>) -> Self {
        Self {
            timers,
            dispatch,
            active: None,
        }
    }

    /// Whether a schedule is currently armed.
    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    /// The currently armed schedule, if any.
    pub fn active(&self) -> Option<&ActiveSchedule> {
        self.active.as_ref()
    }

    /// Build and arm a fresh schedule from `config`.
    ///
    /// Resolves the next occurrence of the configured time-of-day, derives
    /// the notification plan, and installs one deferred firing per
    /// notification plus the terminal firing. Returns the resolved target.
    ///
    /// Does not cancel a previously armed schedule; use [`reschedule`] to
    /// replace one.
    ///
    /// [`reschedule`]: ScheduleController::reschedule
    pub fn schedule(&mut self, config: &CurfewConfig) -> Result<DateTime<Utc>, ScheduleError> {
        let time_of_day = parse_time_of_day(&config.time)?;
        Ok(self.install(config, time_of_day))
    }

    /// Atomically replace the armed schedule with one built from `config`.
    ///
    /// The config is validated first; only on success are the old handles
    /// cancelled and the new firings installed. On error the previously
    /// armed schedule is left fully intact.
    pub fn reschedule(&mut self, config: &CurfewConfig) -> Result<DateTime<Utc>, ScheduleError> {
        // Validate before touching live handles.
        let time_of_day = parse_time_of_day(&config.time)?;
        self.cancel_all();
        Ok(self.install(config, time_of_day))
    }

    /// Cancel every live firing and disarm. Idempotent.
    pub fn cancel_all(&mut self) {
        if let Some(active) = self.active.take() {
            self.timers.cancel(active.terminal);
            for handle in active.notifications {
                self.timers.cancel(handle);
            }
            debug!(target = %active.target, "cancelled active schedule");
        }
    }

    fn install(&mut self, config: &CurfewConfig, time_of_day: NaiveTime) -> DateTime<Utc> {
        let now = self.timers.now();
        let target = resolve_next(now, time_of_day);
        let plan = build_plan(now, target, &config.lead_times());

        let mut notifications = Vec::with_capacity(plan.len());
        for firing in &plan {
            let dispatch = Arc::clone(&self.dispatch);
            let title = config.title.clone();
            let subtitle = config.subtitle.clone();
            let lead_secs = firing.lead_secs;
            // Delay is re-derived against the current clock; the driver
            // clamps past-due delays to zero so a firing that slipped
            // between plan build and install still runs, immediately.
            let delay = firing.fire_at - self.timers.now();
            let handle = self.timers.after(
                delay,
                Box::pin(async move {
                    dispatch.notify(lead_secs, &title, &subtitle).await;
                }),
            );
            notifications.push(handle);
        }

        let dispatch = Arc::clone(&self.dispatch);
        let terminal = self.timers.after(
            target - self.timers.now(),
            Box::pin(async move {
                dispatch.terminal().await;
            }),
        );

        info!(
            target = %target,
            notifications = notifications.len(),
            "shutdown scheduled"
        );

        self.active = Some(ActiveSchedule {
            target,
            terminal,
            notifications,
        });
        target
    }
}
