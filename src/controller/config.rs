use std::time::Duration;

use crate::domain::constants::DEFAULT_POLL_INTERVAL_SECS;
use crate::domain::model::order::AccountContext;

/// Settings for an `OrderController`. The token is passed separately.
#[derive(Clone, Debug)]
pub struct ControllerConfig {
    /// API host; `None` selects the UAT host.
    pub host: Option<String>,
    pub context: AccountContext,
    pub poll_interval: Duration,
    pub polling_enabled: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            host: None,
            context: AccountContext::default(),
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            polling_enabled: true,
        }
    }
}

impl ControllerConfig {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_context(mut self, context: AccountContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn without_polling(mut self) -> Self {
        self.polling_enabled = false;
        self
    }
}
