//! Poller configuration
//!
//! Defines the timing parameters of the polling loop. Both waits are
//! configurable to allow tuning for different service deployments.

use std::time::Duration;

/// Timing configuration for [`crate::poller::StatusPoller`].
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Delay before the first status fetch, to stay clear of the service's
    /// request rate limits.
    pub warm_up: Duration,

    /// Interval between status fetches.
    pub poll_interval: Duration,
}

impl PollerConfig {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - PROSPECT_WARM_UP_SECS (optional, seconds, default: 1)
    /// - PROSPECT_POLL_INTERVAL_SECS (optional, seconds, default: 5)
    pub fn from_env() -> Self {
        let warm_up = std::env::var("PROSPECT_WARM_UP_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(1));

        let poll_interval = std::env::var("PROSPECT_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(5));

        Self {
            warm_up,
            poll_interval,
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            warm_up: Duration::from_secs(1),
            poll_interval: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PollerConfig::default();
        assert_eq!(config.warm_up, Duration::from_secs(1));
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }
}
