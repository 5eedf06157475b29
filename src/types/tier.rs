//! Severity tiers derived from probe results.

use serde::{Deserialize, Serialize};

/// Classification bucket for a single probe result.
///
/// Ordered from best to worst as far as rendering is concerned: `Unknown`
/// (the probe never answered) sorts after `Unhealthy`, and `Error` (the
/// probe faulted) sorts last.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Healthy = 0,
    Degraded = 1,
    Unhealthy = 2,
    Unknown = 3,
    Error = 4,
}

impl SeverityTier {
    /// Lowercase label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Healthy => "healthy",
            SeverityTier::Degraded => "degraded",
            SeverityTier::Unhealthy => "unhealthy",
            SeverityTier::Unknown => "unknown",
            SeverityTier::Error => "error",
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(SeverityTier::Healthy < SeverityTier::Degraded);
        assert!(SeverityTier::Degraded < SeverityTier::Unhealthy);
        assert!(SeverityTier::Unhealthy < SeverityTier::Unknown);
        assert!(SeverityTier::Unknown < SeverityTier::Error);
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        let json = serde_json::to_string(&SeverityTier::Degraded).unwrap();
        assert_eq!(json, "\"degraded\"");
        assert_eq!(SeverityTier::Unknown.as_str(), "unknown");
        assert_eq!(SeverityTier::Error.to_string(), "ERROR");
    }
}
