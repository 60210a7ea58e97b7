//! The seam between fired timers and their side effects.

use async_trait::async_trait;

/// Side-effect sink invoked by scheduled firings.
///
/// The controller installs one deferred callback per notification firing
/// plus one for the shutdown itself; each callback resolves into a call on
/// this trait. Implementations must tolerate being called at most once per
/// installed firing and must not panic.
#[async_trait]
pub trait Dispatch: Send + Sync {
    /// A notification firing: `lead_secs` of remaining time, plus the raw
    /// title/subtitle templates from the configuration generation that
    /// installed the firing.
    async fn notify(&self, lead_secs: u32, title_template: &str, subtitle_template: &str);

    /// The terminal firing. Fire and forget; no retry path exists.
    async fn terminal(&self);
}
