use std::{future::Future, time::Duration};

use tokio::time::sleep;

use crate::{
    error::{ServiceError, ShuffleError},
    shuffle::ProgressObserver,
};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Fixed-delay retry policy applied to every remote call of a shuffle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Runs `call` until it succeeds or the policy gives up.
    ///
    /// Every failure before the last attempt is reported through
    /// `observer.on_retry` and followed by the fixed delay. Running out of
    /// attempts yields [`ShuffleError::RetriesExhausted`] with the last error.
    pub async fn run<T, F, Fut>(
        &self,
        operation: &str,
        observer: &dyn ProgressObserver,
        mut call: F,
    ) -> Result<T, ShuffleError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max_attempts => {
                    observer.on_retry(operation, attempt, &err);
                    sleep(self.delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    return Err(ShuffleError::RetriesExhausted {
                        operation: operation.to_string(),
                        attempts: attempt,
                        source: err,
                    });
                }
            }
        }
    }
}
