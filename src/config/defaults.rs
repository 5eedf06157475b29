//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Check
// ============================================================================

/// Shared deadline for one health-check invocation (milliseconds).
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Display name of the synthetic mean-latency entry.
pub const AGGREGATE_ENTRY_NAME: &str = "Average";

// ============================================================================
// Classification
// ============================================================================

/// Latencies at or below this are healthy (ms).
pub const HEALTHY_MAX_LATENCY_MS: f64 = 100.0;

/// Latencies above `HEALTHY_MAX_LATENCY_MS` and at or below this are
/// degraded; anything above is unhealthy (ms).
pub const DEGRADED_MAX_LATENCY_MS: f64 = 300.0;

// ============================================================================
// Config
// ============================================================================

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "HEALTHPING_CONFIG";

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "healthping.toml";
