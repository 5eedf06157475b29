//! healthping: concurrent latency and availability health checks
//!
//! Runs a set of named probes under one shared deadline, classifies every
//! result into a severity tier and reports the mean latency of the probes
//! that answered.
//!
//! ## Architecture
//!
//! - **Probes**: [`LatencyProbe`] / [`AvailabilityProbe`] traits, plus TCP,
//!   HTTP and fixed-value implementations
//! - **Check engine**: fan-out executor, classifier, aggregator, report assembly
//! - **Config**: TOML probe lists and the shared timeout
//! - **Render**: text / JSON output for the CLI

pub mod check;
pub mod config;
pub mod probe;
pub mod render;
pub mod types;

// Re-export the check engine
pub use check::{
    aggregate_latency, build_report, classify_availability, classify_latency, run_checks,
    run_checks_with_parent, CheckError, CheckResults, HealthChecker, NamedResult,
};

// Re-export configuration
pub use config::{ConfigError, HealthpingConfig};

// Re-export probe contracts
pub use probe::{AvailabilityProbe, LatencyProbe, ProbeError};

// Re-export commonly used types
pub use types::{
    AvailabilityResult, LatencyResult, ProbeKind, RawResult, Report, ReportEntry, SeverityTier,
};
