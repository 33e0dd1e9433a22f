//! Exponential backoff between GitHub request attempts.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ExponentialBackoff {
    initial: Duration,
    max: Duration,
    factor: f64,
    jitter: f64,
}

impl ExponentialBackoff {
    pub fn new(initial: Duration, max: Duration, factor: f64) -> Self {
        Self {
            initial,
            max,
            factor,
            jitter: 0.1,
        }
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.clamp(0.0, 1.0);
        self
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base =
            self.initial.as_millis() as f64 * self.factor.powi(attempt.saturating_sub(1) as i32);
        let clamped = base.min(self.max.as_millis() as f64);

        let jittered = if self.jitter > 0.0 {
            let jitter_range = clamped * self.jitter;
            let jitter_offset = rand::random::<f64>() * jitter_range * 2.0 - jitter_range;
            (clamped + jitter_offset).max(0.0)
        } else {
            clamped
        };

        Duration::from_millis(jittered as u64)
    }
}

impl Default for ExponentialBackoff {
    fn default() -> Self {
        Self::new(Duration::from_millis(250), Duration::from_secs(2), 2.0)
    }
}

/// Retry budget for one GitHub request.
///
/// Only transient failures (transport errors, timeouts, 5xx) are retried.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub backoff: ExponentialBackoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: ExponentialBackoff::default(),
        }
    }
}

impl RetryConfig {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_backoff(mut self, backoff: ExponentialBackoff) -> Self {
        self.backoff = backoff;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff() {
        let backoff =
            ExponentialBackoff::new(Duration::from_millis(250), Duration::from_secs(10), 2.0)
                .with_jitter(0.0);

        assert_eq!(backoff.delay_for(1), Duration::from_millis(250));
        assert_eq!(backoff.delay_for(2), Duration::from_millis(500));
        assert_eq!(backoff.delay_for(3), Duration::from_millis(1000));
    }

    #[test]
    fn test_exponential_backoff_max() {
        let backoff = ExponentialBackoff::default().with_jitter(0.0);
        assert_eq!(backoff.delay_for(10), Duration::from_secs(2));
    }

    #[test]
    fn test_jitter_stays_in_range() {
        let backoff = ExponentialBackoff::new(Duration::from_millis(1000), Duration::from_secs(5), 2.0);
        for _ in 0..50 {
            let delay = backoff.delay_for(1);
            assert!(delay >= Duration::from_millis(900) && delay <= Duration::from_millis(1100));
        }
    }

    #[test]
    fn test_retry_defaults() {
        assert_eq!(RetryConfig::default().max_retries, 2);
        assert_eq!(RetryConfig::none().max_retries, 0);
    }
}
