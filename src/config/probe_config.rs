//! Health-check configuration: shared timeout plus the two probe lists.
//!
//! Each probe entry is tagged by `kind`; fields a kind does not use are
//! ignored by serde and reported as unknown keys by the validation pass.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use super::defaults::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, DEFAULT_TIMEOUT_MS};
use crate::check::HealthChecker;
use crate::probe::{
    AvailabilityProbe, HttpAvailabilityProbe, LatencyProbe, StaticAvailabilityProbe,
    StaticLatencyProbe, TcpLatencyProbe,
};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// Load with `HealthpingConfig::load()` which searches:
/// 1. `$HEALTHPING_CONFIG` env var
/// 2. `./healthping.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthpingConfig {
    /// Shared deadline for one check (ms)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Latency probes, reported in this order
    #[serde(default)]
    pub latency: Vec<LatencyProbeConfig>,

    /// Availability probes, reported in this order after the latency probes
    #[serde(default)]
    pub availability: Vec<AvailabilityProbeConfig>,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for HealthpingConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            latency: Vec::new(),
            availability: Vec::new(),
        }
    }
}

impl HealthpingConfig {
    /// Load configuration using the standard search order:
    /// 1. `$HEALTHPING_CONFIG` environment variable
    /// 2. `./healthping.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        // 1. Check env var
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from {}", CONFIG_ENV_VAR);
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
            }
        }

        // 2. Check ./healthping.toml
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./{}", CONFIG_FILE_NAME);
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", CONFIG_FILE_NAME);
                }
            }
        }

        // 3. Defaults
        info!("No {} found — using built-in defaults", CONFIG_FILE_NAME);
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys are logged as warnings.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every entry and collect all problems at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self.timeout_ms == 0 {
            errors.push("timeout_ms must be greater than zero".to_string());
        }

        for (i, probe) in self.latency.iter().enumerate() {
            let label = format!("latency[{i}]");
            check_name(probe.name(), &label, &mut errors);
            match probe {
                LatencyProbeConfig::Tcp { address, .. } => {
                    if address.trim().is_empty() {
                        errors.push(format!("{label}: address must not be empty"));
                    } else if !address.contains(':') {
                        errors.push(format!("{label}: address '{address}' must be HOST:PORT"));
                    }
                }
                LatencyProbeConfig::Static { value_ms, .. } => {
                    if let Some(v) = value_ms {
                        if !v.is_finite() || *v < 0.0 {
                            errors.push(format!(
                                "{label}: value_ms must be a non-negative number (got {v})"
                            ));
                        }
                    }
                }
            }
        }

        for (i, probe) in self.availability.iter().enumerate() {
            let label = format!("availability[{i}]");
            check_name(probe.name(), &label, &mut errors);
            if let AvailabilityProbeConfig::Http { url, .. } = probe {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    errors.push(format!("{label}: url '{url}' must start with http:// or https://"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Instantiate every configured probe, in order.
    ///
    /// HTTP probes share `client` so they reuse one connection pool.
    pub fn build_checker(&self, client: reqwest::Client) -> HealthChecker {
        let latency = self.latency.iter().map(LatencyProbeConfig::build).collect();
        let availability = self
            .availability
            .iter()
            .map(|p| p.build(&client))
            .collect();
        HealthChecker::new(latency, availability)
    }
}

fn check_name(name: &str, label: &str, errors: &mut Vec<String>) {
    if name.trim().is_empty() {
        errors.push(format!("{label}: name must not be empty"));
    }
}

// ============================================================================
// Probe Entries
// ============================================================================

/// One `[[latency]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LatencyProbeConfig {
    /// Time a TCP connect to `address` (`HOST:PORT`)
    Tcp { name: String, address: String },
    /// Report a fixed value; omit `value_ms` to report no value
    Static {
        name: String,
        #[serde(default)]
        value_ms: Option<f64>,
        #[serde(default)]
        delay_ms: Option<u64>,
    },
}

impl LatencyProbeConfig {
    pub fn name(&self) -> &str {
        match self {
            LatencyProbeConfig::Tcp { name, .. } | LatencyProbeConfig::Static { name, .. } => name,
        }
    }

    fn build(&self) -> Arc<dyn LatencyProbe> {
        match self {
            LatencyProbeConfig::Tcp { name, address } => {
                Arc::new(TcpLatencyProbe::new(name.clone(), address.clone()))
            }
            LatencyProbeConfig::Static {
                name,
                value_ms,
                delay_ms,
            } => Arc::new(
                StaticLatencyProbe::new(name.clone(), *value_ms)
                    .with_delay(Duration::from_millis(delay_ms.unwrap_or(0))),
            ),
        }
    }
}

/// One `[[availability]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AvailabilityProbeConfig {
    /// `GET url`, up on any 2xx
    Http { name: String, url: String },
    /// Report a fixed answer
    Static {
        name: String,
        up: bool,
        #[serde(default)]
        delay_ms: Option<u64>,
    },
}

impl AvailabilityProbeConfig {
    pub fn name(&self) -> &str {
        match self {
            AvailabilityProbeConfig::Http { name, .. }
            | AvailabilityProbeConfig::Static { name, .. } => name,
        }
    }

    fn build(&self, client: &reqwest::Client) -> Arc<dyn AvailabilityProbe> {
        match self {
            AvailabilityProbeConfig::Http { name, url } => Arc::new(
                HttpAvailabilityProbe::with_client(name.clone(), url.clone(), client.clone()),
            ),
            AvailabilityProbeConfig::Static { name, up, delay_ms } => Arc::new(
                StaticAvailabilityProbe::new(name.clone(), *up)
                    .with_delay(Duration::from_millis(delay_ms.unwrap_or(0))),
            ),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}
