//! Submission configuration.
//!
//! Tunables for the identifier-recovery poll. The poll exists to ride out
//! read-after-write lag in the remote store's pending listing, so both knobs
//! stay deliberately small; this is not a general retry policy.

use std::time::Duration;

/// Configuration for the submission orchestrator.
#[derive(Debug, Clone)]
pub struct SubmitConfig {
    /// Maximum pending-listing polls during identifier recovery.
    pub poll_attempts: u32,
    /// Delay before each poll attempt.
    pub poll_delay: Duration,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            poll_attempts: 2,
            poll_delay: Duration::from_secs(2),
        }
    }
}

impl SubmitConfig {
    /// Configuration for tests: same attempt budget, no real waiting.
    pub fn fast() -> Self {
        Self {
            poll_attempts: 2,
            poll_delay: Duration::from_millis(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_poll_budget() {
        let config = SubmitConfig::default();
        assert_eq!(config.poll_attempts, 2);
        assert!(config.poll_delay >= Duration::from_secs(1));
    }
}
