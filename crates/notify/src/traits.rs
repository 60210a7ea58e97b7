//! Observer trait, terminal-action sink, and shared error types.

use std::time::Duration;

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// How long a delivered title should be displayed by an observer.
///
/// Defaults mirror the classic title timing: half a second fade-in,
/// three and a half seconds on screen, one second fade-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayTimings {
    pub fade_in: Duration,
    pub stay: Duration,
    pub fade_out: Duration,
}

impl Default for DisplayTimings {
    fn default() -> Self {
        Self {
            fade_in: Duration::from_millis(500),
            stay: Duration::from_millis(3500),
            fade_out: Duration::from_millis(1000),
        }
    }
}

/// A connected notification sink.
#[async_trait::async_trait]
pub trait Observer: Send + Sync {
    /// Deliver a rendered title/subtitle pair to this observer.
    async fn receive(
        &self,
        title: &str,
        subtitle: &str,
        timings: &DisplayTimings,
    ) -> Result<(), NotifyError>;

    /// Human-readable name for this observer (e.g. "console", "webhook").
    fn name(&self) -> &str;
}

/// The irreversible terminal action, triggered exactly once when the
/// shutdown instant arrives. Fire and forget; no retry path exists.
pub trait TerminalSink: Send + Sync {
    fn trigger(&self);
}

/// Result of delivering one notification to one observer.
#[derive(Debug, Clone)]
pub struct DeliveryOutcome {
    pub observer: String,
    pub success: bool,
    pub error: Option<String>,
}
