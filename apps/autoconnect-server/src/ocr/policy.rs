//! Poll policy for asynchronous Read jobs

use std::time::Duration;

/// Default number of status polls before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default delay before each status poll
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How the delay between polls evolves
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Backoff {
    /// Same delay before every poll
    #[default]
    Fixed,
    /// Delay multiplied by `factor` after each poll, capped at `max_interval`
    Exponential { factor: f64, max_interval: Duration },
}

/// Bounded polling schedule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    pub backoff: Backoff,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
            backoff: Backoff::default(),
        }
    }
}

impl PollPolicy {
    pub fn fixed(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
            backoff: Backoff::Fixed,
        }
    }

    /// Number of polls to perform; never less than one
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait before poll number `attempt` (1-indexed)
    pub fn delay_before(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential {
                factor,
                max_interval,
            } => {
                let exponent = attempt.saturating_sub(1) as i32;
                let scaled = self.interval.as_secs_f64() * factor.max(1.0).powi(exponent);
                if !scaled.is_finite() || scaled >= max_interval.as_secs_f64() {
                    max_interval
                } else {
                    Duration::from_secs_f64(scaled)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PollPolicy::default();
        assert_eq!(policy.attempts(), 10);
        assert_eq!(policy.delay_before(1), Duration::from_secs(1));
        assert_eq!(policy.delay_before(10), Duration::from_secs(1));
        assert_eq!(policy.backoff, Backoff::Fixed);
    }

    #[test]
    fn test_zero_attempts_clamped() {
        let policy = PollPolicy::fixed(0, Duration::from_millis(5));
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn test_exponential_backoff_caps() {
        let policy = PollPolicy {
            max_attempts: 10,
            interval: Duration::from_millis(500),
            backoff: Backoff::Exponential {
                factor: 2.0,
                max_interval: Duration::from_secs(3),
            },
        };
        assert_eq!(policy.delay_before(1), Duration::from_millis(500));
        assert_eq!(policy.delay_before(2), Duration::from_secs(1));
        assert_eq!(policy.delay_before(3), Duration::from_secs(2));
        assert_eq!(policy.delay_before(4), Duration::from_secs(3));
        assert_eq!(policy.delay_before(40), Duration::from_secs(3));
    }
}
