//! Bounded exponential backoff for source fetches.

use std::time::Duration;

use tracing::warn;

use super::source::RecordSource;
use crate::config::RetrySettings;
use crate::error::{EngineError, EngineResult};

/// How many times, and how patiently, a fetch is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Upper bound of any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Returns the delay after the given failed attempt (1-based).
    ///
    /// ```
    /// use folha_engine::loader::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy {
    ///     max_attempts: 5,
    ///     base_delay: Duration::from_millis(500),
    ///     max_delay: Duration::from_secs(3),
    /// };
    /// assert_eq!(policy.delay_for(1), Duration::from_millis(500));
    /// assert_eq!(policy.delay_for(2), Duration::from_millis(1000));
    /// assert_eq!(policy.delay_for(3), Duration::from_millis(2000));
    /// assert_eq!(policy.delay_for(4), Duration::from_secs(3));
    /// ```
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts.max(1),
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
        }
    }
}

/// The result of a retried fetch and the attempts it took.
#[derive(Debug)]
pub struct FetchAttempt {
    /// The fetched bytes, or the error that ended the attempts.
    pub result: EngineResult<Vec<u8>>,
    /// Attempts made.
    pub attempts: u32,
}

/// Fetches a file, retrying transient failures with exponential backoff.
///
/// Permanent failures end the attempts at once. When every attempt fails
/// transiently the error is [`EngineError::FetchExhausted`].
pub async fn fetch_with_retry<S: RecordSource>(
    source: &S,
    name: &str,
    policy: &RetryPolicy,
) -> FetchAttempt {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;
        let error = match source.fetch(name).await {
            Ok(bytes) => {
                return FetchAttempt {
                    result: Ok(bytes),
                    attempts,
                };
            }
            Err(error) => error,
        };

        if !error.is_transient() {
            return FetchAttempt {
                result: Err(error),
                attempts,
            };
        }

        if attempts >= max_attempts {
            return FetchAttempt {
                result: Err(EngineError::FetchExhausted {
                    name: name.to_string(),
                    attempts,
                    message: error.to_string(),
                }),
                attempts,
            };
        }

        let delay = policy.delay_for(attempts);
        warn!(
            file = %name,
            attempt = attempts,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Transient fetch failure, retrying"
        );
        tokio::time::sleep(delay).await;
    }
}
