//! Curfew configuration: the daily shutdown time, notification lead times,
//! and the title/subtitle templates shown to observers.
//!
//! Loaded from a YAML file. A commented default file is written on first
//! start so operators have something to edit.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigError;

/// Default config file contents written by [`CurfewConfig::load_or_init`].
const DEFAULT_CONFIG_YAML: &str = "\
# Daily shutdown time, 24-hour HH:MM:SS.
time: \"00:00:00\"

# Title and subtitle shown to observers at each notification.
# {REMAINING} is replaced with the remaining time as MM:SS.
# &-prefixed color codes are translated (e.g. &c = red).
title: \"&cShutdown in {REMAINING}\"
subtitle: \"&7save your work\"

# Lead times in seconds before the shutdown at which to notify.
notifications:
  - 300
  - 60
  - 10
";

fn default_time() -> String {
    "00:00:00".to_string()
}

/// The curfew schedule configuration, immutable per load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurfewConfig {
    /// Shutdown time of day as `HH:MM:SS` (24-hour).
    #[serde(default = "default_time")]
    pub time: String,
    /// Notification title template (`{REMAINING}` placeholder).
    #[serde(default)]
    pub title: String,
    /// Notification subtitle template (`{REMAINING}` placeholder).
    #[serde(default)]
    pub subtitle: String,
    /// Lead times in seconds before the shutdown. Duplicates are ignored.
    #[serde(default)]
    pub notifications: Vec<u32>,
}

impl Default for CurfewConfig {
    fn default() -> Self {
        Self {
            time: default_time(),
            title: String::new(),
            subtitle: String::new(),
            notifications: Vec::new(),
        }
    }
}

impl CurfewConfig {
    /// Parse a config from a YAML string.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Load the config from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load the config, writing a commented default file first if none exists.
    pub fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, DEFAULT_CONFIG_YAML)?;
            info!(path = %path.display(), "wrote default config file");
        }
        Self::load(path)
    }

    /// Deduplicated lead times, ascending.
    pub fn lead_times(&self) -> BTreeSet<u32> {
        let set: BTreeSet<u32> = self.notifications.iter().copied().collect();
        if set.len() != self.notifications.len() {
            warn!(
                configured = self.notifications.len(),
                unique = set.len(),
                "duplicate notification lead times ignored"
            );
        }
        set
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        info!("Config loaded:");
        info!("  time:          {}", self.time);
        info!("  title:         {:?}", self.title);
        info!("  subtitle:      {:?}", self.subtitle);
        info!("  notifications: {:?}", self.lead_times());
    }
}
