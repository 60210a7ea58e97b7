//! Notification delivery for the curfew daemon.
//!
//! This crate provides:
//! - `Observer` trait for pluggable notification sinks
//! - Console (tracing log) and webhook observer implementations
//! - Template rendering: `{REMAINING}` substitution, `MM:SS` formatting,
//!   `&`-markup color translation
//! - Dispatcher that renders and fans a firing out to all current observers

pub mod console;
pub mod dispatcher;
pub mod registry;
pub mod render;
pub mod traits;
pub mod webhook;

pub use dispatcher::Dispatcher;
pub use registry::{ObserverRegistry, StaticObservers};
pub use traits::{DisplayTimings, NotifyError, Observer, TerminalSink};
