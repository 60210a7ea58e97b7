//! Shared configuration types for the curfew daemon.

pub mod config;
pub mod error;

pub use config::CurfewConfig;
pub use error::ConfigError;
