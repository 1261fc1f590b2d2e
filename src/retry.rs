// Mon Aug 17 2026 - Alex

use crate::error::{ErrorClass, ScanError};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_backoff: Duration, max_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
            max_backoff,
        }
    }

    // Deterministic, jitter-free: min(initial * 2^attempt, max). Concurrent
    // workers throttled by the same endpoint will retry in lockstep.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_backoff.saturating_mul(factor).min(self.max_backoff)
    }
}

#[derive(Debug)]
pub enum InvocationOutcome<T> {
    Success(T),
    RetryableFailure(ScanError),
    TerminalFailure(ScanError),
}

impl<T> InvocationOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, InvocationOutcome::Success(_))
    }

    pub fn into_result(self) -> Result<T, ScanError> {
        match self {
            InvocationOutcome::Success(value) => Ok(value),
            InvocationOutcome::RetryableFailure(err) => Err(err),
            InvocationOutcome::TerminalFailure(err) => Err(err),
        }
    }

    pub fn error(&self) -> Option<&ScanError> {
        match self {
            InvocationOutcome::Success(_) => None,
            InvocationOutcome::RetryableFailure(err) => Some(err),
            InvocationOutcome::TerminalFailure(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Invoker {
    policy: RetryPolicy,
}

impl Invoker {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn invoke<T, F>(&self, mut call: F) -> InvocationOutcome<T>
    where
        F: FnMut() -> Result<T, ScanError>,
    {
        let mut attempt = 0u32;

        loop {
            match call() {
                Ok(value) => return InvocationOutcome::Success(value),
                Err(err) => match err.class() {
                    ErrorClass::Retryable if attempt < self.policy.max_retries => {
                        let delay = self.policy.backoff_delay(attempt);
                        attempt += 1;
                        log::warn!(
                            "Request throttled. Retrying in {:.2}s... (attempt {}/{})",
                            delay.as_secs_f64(),
                            attempt,
                            self.policy.max_retries
                        );
                        thread::sleep(delay);
                    }
                    ErrorClass::Retryable => return InvocationOutcome::RetryableFailure(err),
                    ErrorClass::Terminal => return InvocationOutcome::TerminalFailure(err),
                },
            }
        }
    }
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new(RetryPolicy::default())
    }
}
