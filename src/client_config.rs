//! Client configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_othello_rules::DEFAULT_EVENT_LOG_CAPACITY;
use tracing::{debug, info, instrument};

/// Configuration for an Othello client session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Address of the remote authority (host:port).
    #[serde(default = "default_server_addr")]
    server_addr: String,

    /// Number of actions kept in the session's audit log.
    #[serde(default = "default_event_log_capacity")]
    event_log_capacity: usize,

    /// Log filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    log_level: String,

    /// Print the board after every change.
    #[serde(default = "default_render")]
    render: bool,
}

#[instrument]
fn default_server_addr() -> String {
    "127.0.0.1:9090".to_string()
}

#[instrument]
fn default_event_log_capacity() -> usize {
    DEFAULT_EVENT_LOG_CAPACITY
}

#[instrument]
fn default_log_level() -> String {
    "info".to_string()
}

#[instrument]
fn default_render() -> bool {
    true
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: default_server_addr(),
            event_log_capacity: default_event_log_capacity(),
            log_level: default_log_level(),
            render: default_render(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(server_addr = %config.server_addr, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Overrides the authority address.
    pub fn with_server_addr(mut self, server_addr: impl Into<String>) -> Self {
        self.server_addr = server_addr.into();
        self
    }

    /// Turns board printing on or off.
    pub fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.server_addr(), "127.0.0.1:9090");
        assert_eq!(*config.event_log_capacity(), 512);
        assert_eq!(config.log_level(), "info");
        assert!(*config.render());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ClientConfig = toml::from_str("server_addr = \"10.0.0.2:7000\"").unwrap();
        assert_eq!(config.server_addr(), "10.0.0.2:7000");
        assert_eq!(*config.event_log_capacity(), 512);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::default()
            .with_server_addr("localhost:1")
            .with_render(false);
        assert_eq!(config.server_addr(), "localhost:1");
        assert!(!*config.render());
    }
}
