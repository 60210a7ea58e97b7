//! Config file watcher (hot-reload).
//!
//! Polls the config file's modification time on a fixed interval and
//! reschedules on change. A file that fails to parse is logged and
//! ignored; the previously armed schedule stays in force.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use tracing::{info, warn};

use curfew_core::CurfewConfig;
use curfew_schedule::ScheduleController;

/// Polls a config file for modification-time changes.
pub struct ConfigWatcher {
    path: PathBuf,
    interval: Duration,
    last_modified: Option<SystemTime>,
}

impl ConfigWatcher {
    /// Create a watcher seeded with the file's current modification time,
    /// so the config loaded at startup is not immediately re-applied.
    pub fn new(path: PathBuf, interval: Duration) -> Self {
        let last_modified = modified_at(&path);
        Self {
            path,
            interval,
            last_modified,
        }
    }

    /// Check the file once. Returns the re-parsed config when the
    /// modification time has changed and the file parses, `None` otherwise.
    pub fn poll(&mut self) -> Option<CurfewConfig> {
        let modified = match modified_at(&self.path) {
            Some(m) => m,
            None => {
                warn!(path = %self.path.display(), "config file not readable, keeping previous config");
                return None;
            }
        };
        if self.last_modified == Some(modified) {
            return None;
        }
        self.last_modified = Some(modified);

        match CurfewConfig::load(&self.path) {
            Ok(config) => {
                info!(path = %self.path.display(), "config file changed, reloading");
                Some(config)
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to parse config during hot-reload, keeping previous version"
                );
                None
            }
        }
    }

    /// Poll forever, rescheduling `controller` on every valid change.
    ///
    /// A config that parses as YAML but carries an invalid time-of-day is
    /// rejected by the controller and the previous schedule stays armed.
    pub async fn run(mut self, mut controller: ScheduleController) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if let Some(config) = self.poll() {
                match controller.reschedule(&config) {
                    Ok(target) => {
                        config.log_summary();
                        info!(target = %target, "rescheduled from config change");
                    }
                    Err(e) => {
                        warn!(
                            path = %self.path.display(),
                            error = %e,
                            "rejected config change, keeping previous schedule"
                        );
                    }
                }
            }
        }
    }
}

fn modified_at(path: &std::path::Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}
