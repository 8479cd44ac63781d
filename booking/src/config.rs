//! Configuration management for QuickCourt.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Booking flow settings
    pub booking: BookingConfig,
    /// Booking assistant settings
    pub chat: ChatConfig,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Booking flow configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Number of bookable days starting today
    pub offered_days: u32,
}

/// Booking assistant configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Delay before an ordinary reply, in milliseconds
    pub typing_delay_ms: u64,
    /// Delay before a booking summary or confirmation, in milliseconds
    pub summary_delay_ms: u64,
}

impl ChatConfig {
    /// Ordinary reply delay
    #[must_use]
    pub const fn typing_delay(&self) -> Duration {
        Duration::from_millis(self.typing_delay_ms)
    }

    /// Summary reply delay
    #[must_use]
    pub const fn summary_delay(&self) -> Duration {
        Duration::from_millis(self.summary_delay_ms)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            booking: BookingConfig {
                offered_days: env::var("QUICKCOURT_OFFERED_DAYS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|days| *days > 0)
                    .unwrap_or(defaults.booking.offered_days),
            },
            chat: ChatConfig {
                typing_delay_ms: env::var("QUICKCOURT_CHAT_TYPING_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.chat.typing_delay_ms),
                summary_delay_ms: env::var("QUICKCOURT_CHAT_SUMMARY_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.chat.summary_delay_ms),
            },
            log_level: env::var("RUST_LOG").unwrap_or(defaults.log_level),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            booking: BookingConfig { offered_days: 7 },
            chat: ChatConfig {
                typing_delay_ms: 1000,
                summary_delay_ms: 1500,
            },
            log_level: "info".to_string(),
        }
    }
}
