//! Notification plan derivation.
//!
//! Given the resolved shutdown instant and the configured lead times,
//! produces the set of notification firings that still lie in the future.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

/// A single planned notification: when to fire and which lead time it
/// announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationFiring {
    /// Absolute instant the notification fires (`target - lead_secs`).
    pub fire_at: DateTime<Utc>,
    /// Seconds of remaining time this notification announces.
    pub lead_secs: u32,
}

/// Build the notification plan for one schedule generation.
///
/// Each lead time maps to `fire_at = target - lead_secs`. Firings whose
/// instant is at or before `now` are dropped: they are never fired late
/// and never batched. The result is sorted ascending by `fire_at`.
pub fn build_plan(
    now: DateTime<Utc>,
    target: DateTime<Utc>,
    lead_times: &BTreeSet<u32>,
) -> Vec<NotificationFiring> {
    let mut plan: Vec<NotificationFiring> = lead_times
        .iter()
        .map(|&lead_secs| NotificationFiring {
            fire_at: target - chrono::Duration::seconds(i64::from(lead_secs)),
            lead_secs,
        })
        .filter(|firing| firing.fire_at > now)
        .collect();
    plan.sort_by_key(|firing| firing.fire_at);
    plan
}
