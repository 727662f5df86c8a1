// toot - A command-line client for Mastodon
// Copyright (C) 2025 toot Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Retrying checks against eventually-consistent server state
//!
//! Mentions, follows and federated posts can take a moment to show up in
//! the views that read them. [`run_with_retries`] re-runs a check until its
//! expectations hold, within a bounded number of attempts and a bounded
//! total wait. Only [`CheckError::Unmet`] is retried; anything reported as
//! [`CheckError::Fatal`] is returned straight away.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

/// Outcome of a failed check
#[derive(Debug)]
pub enum CheckError<E> {
    /// The observed state does not (yet) satisfy the check
    Unmet(E),
    /// Something unrelated went wrong; retrying will not help
    Fatal(E),
}

impl<E> CheckError<E> {
    pub fn into_inner(self) -> E {
        match self {
            CheckError::Unmet(e) | CheckError::Fatal(e) => e,
        }
    }
}

#[doc(hidden)]
pub use anyhow;

impl From<anyhow::Error> for CheckError<anyhow::Error> {
    fn from(error: anyhow::Error) -> Self {
        CheckError::Fatal(error)
    }
}

/// Fail a check with [`CheckError::Unmet`] unless `cond` holds
#[macro_export]
macro_rules! check_that {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::retry::CheckError::Unmet($crate::retry::anyhow::anyhow!($($arg)+)));
        }
    };
}

/// How often and how long to retry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first
    pub max_attempts: u32,
    /// Wait before the second attempt
    pub delay: Duration,
    /// Factor applied to the wait after each attempt
    pub multiplier: f64,
    /// Upper bound for a single wait
    pub max_delay: Duration,
    /// Upper bound for the time spent waiting and checking
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(500),
            multiplier: 2.0,
            max_delay: Duration::from_secs(4),
            max_elapsed: Duration::from_secs(15),
        }
    }
}

impl RetryPolicy {
    /// Constant `delay` between `max_attempts` attempts
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            multiplier: 1.0,
            max_delay: delay,
            max_elapsed: delay.saturating_mul(max_attempts.max(1)).saturating_mul(2),
        }
    }

    /// Wait after the given (1-based) failed attempt, never more than `max_delay`
    pub fn delay_after(&self, attempt: u32) -> Duration {
        if self.delay.is_zero() {
            return Duration::ZERO;
        }
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let factor = self.multiplier.max(1.0).powi(exponent);
        Duration::try_from_secs_f64(self.delay.as_secs_f64() * factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

/// Run `check` until it succeeds or the policy's budget is spent.
///
/// Returns the first success. A `Fatal` error ends the loop immediately.
/// When attempts or time run out, the error from the last `Unmet` attempt
/// is returned.
pub async fn run_with_retries<T, E, F, Fut>(policy: RetryPolicy, mut check: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CheckError<E>>>,
    E: Display,
{
    let started = Instant::now();
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let error = match check().await {
            Ok(value) => return Ok(value),
            Err(CheckError::Fatal(error)) => return Err(error),
            Err(CheckError::Unmet(error)) => error,
        };

        if attempt >= max_attempts {
            warn!(attempts = attempt, "Check still failing, giving up: {}", error);
            return Err(error);
        }

        let delay = policy.delay_after(attempt);
        if started.elapsed().saturating_add(delay) > policy.max_elapsed {
            warn!(
                attempts = attempt,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Retry time budget spent: {}",
                error
            );
            return Err(error);
        }

        debug!(attempt, delay_ms = delay.as_millis() as u64, "Check unmet, retrying: {}", error);
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}
