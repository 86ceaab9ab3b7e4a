//! Polling helpers for reads that only become consistent some time after a
//! write, such as a listing endpoint catching up with an upload or delete.

use crate::error::{Error, Result};
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

pub const DEFAULT_MAX_WAIT: Duration = Duration::from_secs(45);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(5);

/// Time budget for [`WaitConfig::until`].
///
/// `max_wait` is measured from the start of the wait, so it includes
/// `initial_delay`. With `max_wait < initial_delay + poll_interval` a wait
/// performs a single check after the delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub max_wait: Duration,
    pub poll_interval: Duration,
    pub initial_delay: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            max_wait: DEFAULT_MAX_WAIT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

impl WaitConfig {
    pub fn new(max_wait: Duration, poll_interval: Duration, initial_delay: Duration) -> Self {
        Self {
            max_wait,
            poll_interval,
            initial_delay,
        }
    }

    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = max_wait;
        self
    }

    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }

    /// Poll `poll_fn` until `predicate` accepts its result.
    ///
    /// Sleeps `initial_delay`, then polls every `poll_interval`. Returns the
    /// first accepted result, or [`Error::WaitTimeout`] carrying the last
    /// observed value once `max_wait` has elapsed. An `Err` from `poll_fn`
    /// aborts the wait immediately.
    pub async fn until<T, F, Fut, P>(
        &self,
        description: &str,
        mut poll_fn: F,
        predicate: P,
    ) -> Result<T>
    where
        T: Debug,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
        P: Fn(&T) -> bool,
    {
        let start = Instant::now();

        if self.max_wait < self.initial_delay.saturating_add(self.poll_interval) {
            debug!(
                max_wait = ?self.max_wait,
                "wait budget allows a single check for {}", description
            );
        }

        tokio::time::sleep(self.initial_delay).await;

        let mut attempts = 0u32;
        loop {
            attempts += 1;

            let observed = match poll_fn().await {
                Ok(observed) => observed,
                Err(e) => {
                    debug!(attempts, error = %e, "poll failed while waiting for {}", description);
                    return Err(e);
                }
            };

            if predicate(&observed) {
                debug!(
                    attempts,
                    elapsed = ?start.elapsed(),
                    "condition met for {}", description
                );
                return Ok(observed);
            }

            let waited = start.elapsed();
            if waited >= self.max_wait {
                let last_observed = format!("{observed:?}");
                warn!(
                    attempts,
                    ?waited,
                    %last_observed,
                    "gave up waiting for {}", description
                );
                return Err(Error::WaitTimeout {
                    description: description.to_string(),
                    waited,
                    attempts,
                    last_observed,
                });
            }

            debug!(attempts, ?observed, "not yet: {}", description);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Accepts values equal to `expected`.
pub fn equal_to<T: PartialEq>(expected: T) -> impl Fn(&T) -> bool {
    move |value| *value == expected
}

/// Inverts `predicate`.
pub fn not<T, P>(predicate: P) -> impl Fn(&T) -> bool
where
    P: Fn(&T) -> bool,
{
    move |value| !predicate(value)
}
