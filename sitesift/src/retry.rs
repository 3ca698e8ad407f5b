//! Retry with configurable backoff for transient upstream failures.
//!
//! The search API is the only component retried in-crate; page fetches are
//! single-attempt by design, with failures isolated per item instead.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backoff strategy for retry delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BackoffStrategy {
    /// delay = base * 2^attempt
    #[default]
    Exponential,
    /// delay = base * (attempt + 1)
    Linear,
    /// delay = base (constant)
    Constant,
}

/// Jitter strategy to prevent thundering herd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JitterStrategy {
    /// No jitter. Delays increase strictly with exponential or linear
    /// backoff, which keeps retry timing predictable and testable.
    #[default]
    None,
    /// Random from 0 to the computed delay.
    Full,
}

/// Configuration for retry behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum attempts, including the initial one.
    pub max_attempts: usize,
    /// Base delay between retries in milliseconds.
    pub base_delay_ms: u64,
    /// Maximum delay cap in milliseconds.
    pub max_delay_ms: u64,
    /// Backoff strategy.
    pub backoff_strategy: BackoffStrategy,
    /// Jitter strategy.
    pub jitter_strategy: JitterStrategy,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30000,
            backoff_strategy: BackoffStrategy::Exponential,
            jitter_strategy: JitterStrategy::None,
        }
    }
}

impl RetryConfig {
    /// Creates a new retry config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum attempts.
    #[must_use]
    pub const fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the base delay.
    #[must_use]
    pub const fn with_base_delay_ms(mut self, delay: u64) -> Self {
        self.base_delay_ms = delay;
        self
    }

    /// Sets the maximum delay.
    #[must_use]
    pub const fn with_max_delay_ms(mut self, delay: u64) -> Self {
        self.max_delay_ms = delay;
        self
    }

    /// Sets the backoff strategy.
    #[must_use]
    pub const fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff_strategy = strategy;
        self
    }

    /// Sets the jitter strategy.
    #[must_use]
    pub const fn with_jitter(mut self, strategy: JitterStrategy) -> Self {
        self.jitter_strategy = strategy;
        self
    }

    /// Computes the delay before the retry following `attempt` (0-indexed).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let base = self.base_delay_ms;
        let max = self.max_delay_ms;

        #[allow(clippy::cast_possible_truncation)]
        let delay = match self.backoff_strategy {
            BackoffStrategy::Exponential => base
                .saturating_mul(2_u64.saturating_pow(attempt as u32))
                .min(max),
            BackoffStrategy::Linear => base.saturating_mul(attempt as u64 + 1).min(max),
            BackoffStrategy::Constant => base.min(max),
        };

        let jittered = match self.jitter_strategy {
            JitterStrategy::None => delay,
            JitterStrategy::Full => {
                if delay == 0 {
                    0
                } else {
                    rand::thread_rng().gen_range(0..=delay)
                }
            }
        };

        Duration::from_millis(jittered)
    }
}

/// Executes an operation with retry, backoff, and a retryability predicate.
///
/// The operation runs up to `config.max_attempts` times. An error for which
/// `is_retryable` returns `false` is surfaced immediately; otherwise each
/// retry is logged with its attempt number and backoff delay before
/// sleeping.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or the first
/// non-retryable error.
pub async fn with_retry<T, E, F, Fut, P>(
    config: &RetryConfig,
    key: &str,
    is_retryable: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let mut attempt = 0_usize;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempt += 1;
                if !is_retryable(&e) || attempt >= config.max_attempts {
                    return Err(e);
                }

                let delay = config.delay_for_attempt(attempt - 1);
                tracing::warn!(
                    key,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, waiting before next retry"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.base_delay_ms, 1000);
        assert_eq!(config.backoff_strategy, BackoffStrategy::Exponential);
        assert_eq!(config.jitter_strategy, JitterStrategy::None);
    }

    #[test]
    fn test_exponential_delays_strictly_increase() {
        let config = RetryConfig::new()
            .with_base_delay_ms(100)
            .with_jitter(JitterStrategy::None);

        let delays: Vec<Duration> = (0..4).map(|a| config.delay_for_attempt(a)).collect();
        assert_eq!(delays[0], Duration::from_millis(100));
        assert_eq!(delays[1], Duration::from_millis(200));
        assert_eq!(delays[2], Duration::from_millis(400));
        assert_eq!(delays[3], Duration::from_millis(800));
        assert!(delays.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_linear_delays() {
        let config = RetryConfig::new()
            .with_base_delay_ms(100)
            .with_backoff(BackoffStrategy::Linear);

        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(300));
    }

    #[test]
    fn test_delay_capped_at_max() {
        let config = RetryConfig::new()
            .with_base_delay_ms(1000)
            .with_max_delay_ms(5000);

        assert_eq!(config.delay_for_attempt(10), Duration::from_millis(5000));
    }

    #[test]
    fn test_full_jitter_bounded() {
        let config = RetryConfig::new()
            .with_base_delay_ms(100)
            .with_backoff(BackoffStrategy::Constant)
            .with_jitter(JitterStrategy::Full);

        for _ in 0..20 {
            assert!(config.delay_for_attempt(0) <= Duration::from_millis(100));
        }
    }

    #[tokio::test]
    async fn test_with_retry_success_first_try() {
        let config = RetryConfig::new();
        let mut calls = 0;

        let result: Result<i32, String> = with_retry(&config, "test", |_| true, || {
            calls += 1;
            async { Ok(42) }
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_with_retry_success_after_failures() {
        let config = RetryConfig::new()
            .with_max_attempts(5)
            .with_base_delay_ms(1);

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_op = calls.clone();

        let result: Result<i32, String> = with_retry(&config, "test", |_| true, || {
            let c = calls_op.clone();
            async move {
                if c.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err("transient".to_string())
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_exhausts_attempt_ceiling() {
        let config = RetryConfig::new()
            .with_max_attempts(3)
            .with_base_delay_ms(1);

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_op = calls.clone();

        let result: Result<i32, String> = with_retry(&config, "test", |_| true, || {
            let c = calls_op.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Err("always fails".to_string())
            }
        })
        .await;

        assert!(result.is_err());
        // Exactly the attempt ceiling, never more.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_non_retryable_fails_fast() {
        let config = RetryConfig::new().with_max_attempts(5).with_base_delay_ms(1);

        let calls = Arc::new(AtomicUsize::new(0));
        let calls_op = calls.clone();

        let result: Result<i32, String> =
            with_retry(&config, "test", |e: &String| e != "fatal", || {
                let c = calls_op.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err("fatal".to_string())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
