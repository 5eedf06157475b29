//! Shared data structures for a health-check invocation
//!
//! - [`LatencyResult`] / [`AvailabilityResult`]: raw per-probe outcomes
//! - [`SeverityTier`]: classification bucket
//! - [`Report`] / [`ReportEntry`]: the ordered report handed to the caller

mod report;
mod result;
mod tier;

pub use report::*;
pub use result::*;
pub use tier::*;
