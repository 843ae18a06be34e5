use crate::config::DownloadConfig;
use std::time::Duration;

/// Decision returned by the retry policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Give up and report the last error
    NoRetry,
    /// Try again after the pause
    RetryAfter(Duration),
}

/// Fixed-pause retry policy
///
/// Every download failure (transport error, bad status, empty body) is
/// retryable; only the attempt cap stops the loop.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first)
    pub max_attempts: u32,
    /// Pause between attempts
    pub pause: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&DownloadConfig::default())
    }
}

impl RetryPolicy {
    pub fn from_config(config: &DownloadConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            pause: config.retry_pause(),
        }
    }

    /// `attempt` is 1-based (1 = first attempt)
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            RetryDecision::NoRetry
        } else {
            RetryDecision::RetryAfter(self.pause)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_max_attempts() {
        let policy = RetryPolicy {
            max_attempts: 3,
            pause: Duration::from_millis(5),
        };
        assert_eq!(
            policy.decide(1),
            RetryDecision::RetryAfter(Duration::from_millis(5))
        );
        assert!(matches!(policy.decide(2), RetryDecision::RetryAfter(_)));
        assert_eq!(policy.decide(3), RetryDecision::NoRetry);
    }

    #[test]
    fn zero_attempts_clamped_to_one() {
        let config = DownloadConfig {
            max_attempts: 0,
            ..DownloadConfig::default()
        };
        let policy = RetryPolicy::from_config(&config);
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.decide(1), RetryDecision::NoRetry);
    }

    #[test]
    fn default_matches_config_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.pause, Duration::from_secs(1));
    }
}
