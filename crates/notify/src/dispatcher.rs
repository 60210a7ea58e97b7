//! Renders firings and fans them out to the current observers.
//!
//! Delivery is best-effort per observer: an individual failure is logged
//! and recorded, and the remaining observers still receive. The dispatcher
//! also carries the terminal-action passthrough, making it the single
//! [`Dispatch`] implementation the schedule controller fires into.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use curfew_schedule::Dispatch;

use crate::registry::ObserverRegistry;
use crate::render::render_template;
use crate::traits::{DeliveryOutcome, DisplayTimings, TerminalSink};

/// Dispatches rendered notifications to all current observers and relays
/// the terminal firing to its sink.
pub struct Dispatcher {
    observers: Arc<dyn ObserverRegistry>,
    terminal: Arc<dyn TerminalSink>,
    timings: DisplayTimings,
}

impl Dispatcher {
    pub fn new(observers: Arc<dyn ObserverRegistry>, terminal: Arc<dyn TerminalSink>) -> Self {
        Self {
            observers,
            terminal,
            timings: DisplayTimings::default(),
        }
    }

    /// Override the display timings sent with each delivery.
    pub fn with_timings(mut self, timings: DisplayTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Render both templates for `lead_secs` and deliver to every current
    /// observer. Returns one outcome per observer; failures never block
    /// the remaining deliveries.
    pub async fn deliver(
        &self,
        lead_secs: u32,
        title_template: &str,
        subtitle_template: &str,
    ) -> Vec<DeliveryOutcome> {
        let title = render_template(title_template, lead_secs);
        let subtitle = render_template(subtitle_template, lead_secs);

        let observers = self.observers.current();
        if observers.is_empty() {
            debug!(lead_secs, "no observers connected, notification dropped");
            return Vec::new();
        }

        let mut outcomes = Vec::with_capacity(observers.len());
        for observer in observers {
            let result = observer.receive(&title, &subtitle, &self.timings).await;
            let (success, error) = match result {
                Ok(()) => {
                    debug!(observer = observer.name(), lead_secs, "notification delivered");
                    (true, None)
                }
                Err(e) => {
                    warn!(
                        observer = observer.name(),
                        lead_secs,
                        error = %e,
                        "notification delivery failed"
                    );
                    (false, Some(e.to_string()))
                }
            };
            outcomes.push(DeliveryOutcome {
                observer: observer.name().to_string(),
                success,
                error,
            });
        }
        outcomes
    }
}

#[async_trait]
impl Dispatch for Dispatcher {
    async fn notify(&self, lead_secs: u32, title_template: &str, subtitle_template: &str) {
        let outcomes = self
            .deliver(lead_secs, title_template, subtitle_template)
            .await;
        let failed = outcomes.iter().filter(|o| !o.success).count();
        if failed > 0 {
            warn!(
                lead_secs,
                delivered = outcomes.len() - failed,
                failed,
                "notification partially delivered"
            );
        }
    }

    async fn terminal(&self) {
        info!("shutdown instant reached, triggering terminal action");
        self.terminal.trigger();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StaticObservers;
    use crate::traits::{NotifyError, Observer};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockObserver {
        name: String,
        received: Mutex<Vec<(String, String)>>,
        should_fail: bool,
    }

    impl MockObserver {
        fn new(name: &str, should_fail: bool) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                received: Mutex::new(Vec::new()),
                should_fail,
            })
        }
    }

    #[async_trait]
    impl Observer for MockObserver {
        async fn receive(
            &self,
            title: &str,
            subtitle: &str,
            _timings: &DisplayTimings,
        ) -> Result<(), NotifyError> {
            self.received
                .lock()
                .unwrap()
                .push((title.to_string(), subtitle.to_string()));
            if self.should_fail {
                Err(NotifyError::Delivery("mock failure".to_string()))
            } else {
                Ok(())
            }
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[derive(Default)]
    struct CountingSink {
        triggers: AtomicUsize,
    }

    impl TerminalSink for CountingSink {
        fn trigger(&self) {
            self.triggers.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn dispatcher_with(
        observers: Vec<Arc<dyn Observer>>,
    ) -> (Dispatcher, Arc<CountingSink>) {
        let sink = Arc::new(CountingSink::default());
        let dispatcher = Dispatcher::new(
            Arc::new(StaticObservers::new(observers)),
            Arc::clone(&sink) as Arc<dyn TerminalSink>,
        );
        (dispatcher, sink)
    }

    #[tokio::test]
    async fn delivers_rendered_text_to_all_observers() {
        let a = MockObserver::new("a", false);
        let b = MockObserver::new("b", false);
        let (dispatcher, _sink) =
            dispatcher_with(vec![a.clone() as Arc<dyn Observer>, b.clone()]);

        let outcomes = dispatcher
            .deliver(125, "&cdown in {REMAINING}", "save")
            .await;

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|o| o.success));
        for observer in [&a, &b] {
            let received = observer.received.lock().unwrap();
            assert_eq!(
                received.as_slice(),
                &[("\u{00A7}cdown in 02:05".to_string(), "save".to_string())]
            );
        }
    }

    #[tokio::test]
    async fn failed_observer_does_not_block_the_rest() {
        let failing = MockObserver::new("failing", true);
        let ok = MockObserver::new("ok", false);
        let (dispatcher, _sink) =
            dispatcher_with(vec![failing.clone() as Arc<dyn Observer>, ok.clone()]);

        let outcomes = dispatcher.deliver(60, "{REMAINING}", "").await;

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].success);
        assert!(outcomes[0].error.as_deref().unwrap().contains("mock failure"));
        assert!(outcomes[1].success);
        assert_eq!(ok.received.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn no_observers_yields_no_outcomes() {
        let (dispatcher, _sink) = dispatcher_with(Vec::new());
        let outcomes = dispatcher.deliver(60, "t", "s").await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn terminal_triggers_sink_once() {
        let (dispatcher, sink) = dispatcher_with(Vec::new());
        dispatcher.terminal().await;
        assert_eq!(sink.triggers.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn notify_seam_delegates_to_deliver() {
        let observer = MockObserver::new("only", false);
        let (dispatcher, _sink) = dispatcher_with(vec![observer.clone() as Arc<dyn Observer>]);

        Dispatch::notify(&dispatcher, 10, "{REMAINING} left", "").await;

        let received = observer.received.lock().unwrap();
        assert_eq!(received[0].0, "00:10 left");
    }
}
