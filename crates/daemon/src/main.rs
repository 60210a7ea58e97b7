//! curfewd: daily shutdown scheduler daemon.
//!
//! Loads the curfew config, arms the schedule, hot-reloads on config
//! changes, and exits when the shutdown instant arrives.

mod watcher;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use curfew_core::CurfewConfig;
use curfew_notify::webhook::WebhookObserver;
use curfew_notify::{console::LogObserver, Dispatcher, Observer, StaticObservers, TerminalSink};
use curfew_schedule::{Dispatch, ScheduleController, TimerDriver, TokioTimers};

use watcher::ConfigWatcher;

#[derive(Parser, Debug)]
#[command(name = "curfewd", about = "Daily shutdown scheduler")]
struct Cli {
    /// Path to the YAML config file (created with defaults if missing)
    #[arg(short, long, env = "CURFEW_CONFIG", default_value = "curfew.yml")]
    config: PathBuf,

    /// Config poll interval in seconds
    #[arg(long, default_value_t = 1)]
    poll_interval: u64,

    /// Webhook observer URL (repeatable; ${VAR} env references allowed)
    #[arg(long = "webhook")]
    webhooks: Vec<String>,
}

/// Terminal sink that wakes the main task so the process can exit.
struct ShutdownTrigger {
    tx: mpsc::UnboundedSender<()>,
}

impl TerminalSink for ShutdownTrigger {
    fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = CurfewConfig::load_or_init(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    config.log_summary();

    let mut observers: Vec<Arc<dyn Observer>> = vec![Arc::new(LogObserver)];
    for url in &cli.webhooks {
        let observer = WebhookObserver::new(url)
            .with_context(|| format!("invalid webhook observer: {url}"))?;
        observers.push(Arc::new(observer));
    }
    info!(observers = observers.len(), "observers configured");

    let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(
        Arc::new(StaticObservers::new(observers)),
        Arc::new(ShutdownTrigger { tx: shutdown_tx }),
    );

    let timers = Arc::new(TokioTimers::new());
    let mut controller = ScheduleController::new(
        timers as Arc<dyn TimerDriver>,
        Arc::new(dispatcher) as Arc<dyn Dispatch>,
    );
    controller
        .schedule(&config)
        .with_context(|| format!("invalid shutdown time in {}", cli.config.display()))?;

    let watcher = ConfigWatcher::new(cli.config.clone(), Duration::from_secs(cli.poll_interval));
    tokio::spawn(watcher.run(controller));

    tokio::select! {
        _ = shutdown_rx.recv() => {
            info!("shutdown instant reached, exiting");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, exiting");
        }
    }

    Ok(())
}
