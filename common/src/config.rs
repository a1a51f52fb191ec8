use std::time::Duration;

/// Polling behaviour for remote long-running operations.
#[derive(Clone, Debug)]
pub struct PollConfig {
    /// Delay between consecutive status fetches.
    pub interval: Duration,
    /// Total time budget before the poller gives up with a timeout.
    pub max_wait: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_wait: Duration::from_secs(600),
        }
    }
}
