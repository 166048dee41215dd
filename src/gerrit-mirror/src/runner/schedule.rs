//! When reconciliation cycles run.

use super::SyncError;
use crate::summary::CycleSummary;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Cycle schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Run a single cycle.
    Once,
    /// Run a cycle immediately and then once per period, forever.
    Every(Duration),
}

impl Schedule {
    /// Rejects a repeating schedule with a zero period.
    pub fn validate(&self) -> Result<(), SyncError> {
        match self {
            Self::Every(period) if period.is_zero() => Err(SyncError::ZeroPeriod),
            _ => Ok(()),
        }
    }

    /// Runs `cycle` according to the schedule.
    ///
    /// `Once` returns the summary of its cycle. `Every` only returns when a
    /// cycle fails; there is no retry. A zero period fails before any cycle
    /// runs.
    pub async fn drive<F, Fut>(&self, mut cycle: F) -> Result<CycleSummary, SyncError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<CycleSummary, SyncError>>,
    {
        self.validate()?;
        match self {
            Self::Once => cycle().await,
            Self::Every(period) => {
                let mut ticker = tokio::time::interval(*period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    cycle().await?;
                }
            }
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Once => f.write_str("once"),
            Self::Every(period) => write!(f, "every {}s", period.as_secs()),
        }
    }
}
