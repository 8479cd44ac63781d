//! Dependencies of the booking assistant.

use crate::catalog::VenueCatalog;
use crate::config::ChatConfig;
use quickcourt_core::environment::Clock;
use std::sync::Arc;
use std::time::Duration;

/// Environment for the chatbot reducer
#[derive(Clone)]
pub struct ChatbotEnvironment {
    /// Timestamps for messages
    pub clock: Arc<dyn Clock>,
    /// Venue names offered in chat
    pub catalog: Arc<dyn VenueCatalog>,
    /// Delay before ordinary replies
    pub typing_delay: Duration,
    /// Delay before booking summaries and confirmations
    pub summary_delay: Duration,
}

impl ChatbotEnvironment {
    /// Environment with the default delays (1000 ms / 1500 ms)
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, catalog: Arc<dyn VenueCatalog>) -> Self {
        Self {
            clock,
            catalog,
            typing_delay: Duration::from_millis(1000),
            summary_delay: Duration::from_millis(1500),
        }
    }

    /// Override both delays
    #[must_use]
    pub fn with_delays(mut self, typing: Duration, summary: Duration) -> Self {
        self.typing_delay = typing;
        self.summary_delay = summary;
        self
    }

    /// Take the delays from configuration
    #[must_use]
    pub fn with_config(self, config: &ChatConfig) -> Self {
        self.with_delays(config.typing_delay(), config.summary_delay())
    }
}
