//! Per-cycle summary.

mod cycle_summary;

pub use cycle_summary::CycleSummary;
