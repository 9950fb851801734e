//! Frontend configuration structures and loaders.
//!
//! This module contains UI-specific configuration that is shared across
//! different frontend implementations (CLI, GUI, etc.).

use std::env;

/// Frontend-specific configuration.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    pub messages: MessageConfig,
}

impl FrontendConfig {
    pub const fn new(messages: MessageConfig) -> Self {
        Self { messages }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `PVE_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    /// - `PVE_SHOW_REFRESH_MESSAGES` - Record refresh failures in the message log (default: true)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(capacity) = read_env::<usize>("PVE_MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }
        if let Some(show) = read_env_bool("PVE_SHOW_REFRESH_MESSAGES") {
            config.messages.show_refresh_failures = show;
        }

        config
    }

    pub fn with_message_capacity(mut self, capacity: usize) -> Self {
        self.messages.capacity = capacity.max(1);
        self
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
    /// Refresh failures are always logged; this controls whether the
    /// player also sees them.
    pub show_refresh_failures: bool,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            capacity: 64,
            show_refresh_failures: true,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FrontendConfig::default();
        assert_eq!(config.messages.capacity, 64);
        assert!(config.messages.show_refresh_failures);
    }

    #[test]
    fn capacity_is_at_least_one() {
        let config = FrontendConfig::default().with_message_capacity(0);
        assert_eq!(config.messages.capacity, 1);
    }
}
