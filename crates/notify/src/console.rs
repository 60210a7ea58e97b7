//! Console observer: writes notifications to the process log.

use async_trait::async_trait;
use tracing::info;

use crate::traits::{DisplayTimings, NotifyError, Observer};

/// Observer that logs each notification through `tracing`.
///
/// Always present so a daemon with no external observers still surfaces
/// the countdown somewhere.
#[derive(Debug, Default)]
pub struct LogObserver;

#[async_trait]
impl Observer for LogObserver {
    async fn receive(
        &self,
        title: &str,
        subtitle: &str,
        _timings: &DisplayTimings,
    ) -> Result<(), NotifyError> {
        if subtitle.is_empty() {
            info!(%title, "notification");
        } else {
            info!(%title, %subtitle, "notification");
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
