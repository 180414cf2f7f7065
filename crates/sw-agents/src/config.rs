//! Scheduler configuration.

use std::time::Duration;

/// How long a decision may take, and what to do when it does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Wall-clock budget for one decision. The world stays frozen while
    /// a decision is pending; past the budget the fallback command runs.
    pub decision_timeout: Duration,
    /// Command executed when a decision times out or errors.
    pub fallback_command: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            decision_timeout: Duration::from_secs(30),
            fallback_command: "look".to_string(),
        }
    }
}

impl SchedulerConfig {
    /// The default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decision timeout.
    pub fn with_decision_timeout(mut self, timeout: Duration) -> Self {
        self.decision_timeout = timeout;
        self
    }

    /// Set the fallback command.
    pub fn with_fallback_command(mut self, command: impl Into<String>) -> Self {
        self.fallback_command = command.into();
        self
    }
}
