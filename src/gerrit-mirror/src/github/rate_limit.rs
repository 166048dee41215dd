//! Core API rate limit guard.
//!
//! Every mirror call is preceded by a rate limit check; when the remaining
//! budget is nearly spent the reconciler sleeps until the window resets.

use octocrab::Octocrab;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Longest we are willing to sleep for a reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Remaining requests below which we wait for the reset.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Rate limit state of the core API.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the window resets.
    pub reset: u64,
}

impl RateLimitInfo {
    /// How long to wait before the next call, if at all, given the current
    /// Unix time.
    #[must_use]
    pub fn wait_duration(&self, now: u64) -> Option<Duration> {
        if self.remaining >= MIN_REMAINING_THRESHOLD || self.reset <= now {
            return None;
        }
        let wait_secs = self.reset - now;
        if wait_secs > MAX_WAIT_SECS {
            warn!(
                wait_secs,
                max_wait = MAX_WAIT_SECS,
                "Rate limit reset too far in future, capping wait time"
            );
        }
        Some(Duration::from_secs(wait_secs.min(MAX_WAIT_SECS)))
    }
}

/// Fetches the core API rate limit.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;
    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
    })
}

/// Sleeps until the core rate limit resets if the budget is nearly spent.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let rate = check_core_rate_limit(octocrab).await?;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    if let Some(wait) = rate.wait_duration(now) {
        info!(
            remaining = rate.remaining,
            wait_secs = wait.as_secs(),
            "Rate limit low, waiting for reset"
        );
        tokio::time::sleep(wait).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_wait_with_budget_left() {
        let rate = RateLimitInfo {
            remaining: 100,
            reset: 2_000,
        };
        assert_eq!(rate.wait_duration(1_000), None);
    }

    #[test]
    fn no_wait_once_reset_has_passed() {
        let rate = RateLimitInfo {
            remaining: 1,
            reset: 500,
        };
        assert_eq!(rate.wait_duration(1_000), None);
    }

    #[test]
    fn waits_until_reset_when_budget_is_low() {
        let rate = RateLimitInfo {
            remaining: 2,
            reset: 1_030,
        };
        assert_eq!(rate.wait_duration(1_000), Some(Duration::from_secs(30)));
    }

    #[test]
    fn caps_wait_at_one_hour() {
        let rate = RateLimitInfo {
            remaining: 0,
            reset: 100_000,
        };
        assert_eq!(
            rate.wait_duration(0),
            Some(Duration::from_secs(MAX_WAIT_SECS))
        );
    }
}
