use std::time::Duration;

/// Default number of provider calls a single request may spend.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;

/// How many times the provider is asked before an empty answer is accepted.
///
/// The bound is an attempt count, not a deadline: with the default zero delay
/// a provider that keeps answering empty is called back to back until
/// `max_attempts` calls have been made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            // At least one call is always made
            max_attempts: max_attempts.max(1),
            retry_delay: Duration::ZERO,
        }
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn has_delay(&self) -> bool {
        !self.retry_delay.is_zero()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
