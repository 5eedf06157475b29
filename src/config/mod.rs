//! Health-check configuration
//!
//! Probe lists and the shared timeout, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `HEALTHPING_CONFIG` environment variable (path to TOML file)
//! 2. `healthping.toml` in the current working directory
//! 3. Built-in defaults (5000 ms timeout, no probes)
//!
//! ## Usage
//!
//! ```ignore
//! let config = HealthpingConfig::load();
//! let checker = config.build_checker(reqwest::Client::new());
//! let report = checker.run(config.timeout()).await?;
//! ```

mod probe_config;
pub mod defaults;
pub mod validation;

pub use probe_config::*;
