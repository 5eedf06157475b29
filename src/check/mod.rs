//! Health-check engine: fan out, collect, classify, aggregate.
//!
//! ```text
//! probes + timeout ─► executor ─► CheckResults ─► classify + aggregate ─► Report
//! ```
//!
//! [`HealthChecker`] is the entry point callers use; the stages are public
//! so front ends can run them separately.

mod aggregate;
mod checker;
mod classify;
mod executor;
mod report;

pub use aggregate::aggregate_latency;
pub use checker::HealthChecker;
pub use classify::{classify_availability, classify_latency};
pub use executor::{run_checks, run_checks_with_parent, CheckError, CheckResults, NamedResult};
pub use report::build_report;
