//! Raw per-probe results, before classification.

use serde::{Deserialize, Serialize};

/// Outcome of one latency probe.
///
/// The three states stay distinct all the way into the report: a probe that
/// answered, a probe that ran out of time (or had nothing to say), and a
/// probe that faulted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", content = "ms", rename_all = "lowercase")]
pub enum LatencyResult {
    /// Round-trip time in milliseconds. Always finite and non-negative.
    Measured(f64),
    /// Deadline elapsed, or the probe produced no value.
    Absent,
    /// The probe raised a fault.
    Error,
}

impl LatencyResult {
    /// Accept a raw probe reading.
    ///
    /// `None` becomes `Absent`; negative, NaN or infinite readings are not a
    /// measurement and become `Error`.
    pub fn from_reading(reading: Option<f64>) -> Self {
        match reading {
            None => LatencyResult::Absent,
            Some(ms) if ms.is_finite() && ms >= 0.0 => LatencyResult::Measured(ms),
            Some(_) => LatencyResult::Error,
        }
    }

    /// The measured value, if there is one.
    pub fn value(&self) -> Option<f64> {
        match self {
            LatencyResult::Measured(ms) => Some(*ms),
            LatencyResult::Absent | LatencyResult::Error => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LatencyResult::Error)
    }
}

/// Outcome of one availability probe.
///
/// There is no separate timed-out state: an availability probe that never
/// answered is reported exactly like one that faulted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", content = "up", rename_all = "lowercase")]
pub enum AvailabilityResult {
    Answered(bool),
    Error,
}

impl AvailabilityResult {
    pub fn is_up(&self) -> bool {
        matches!(self, AvailabilityResult::Answered(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reading() {
        assert_eq!(LatencyResult::from_reading(Some(42.0)), LatencyResult::Measured(42.0));
        assert_eq!(LatencyResult::from_reading(Some(0.0)), LatencyResult::Measured(0.0));
        assert_eq!(LatencyResult::from_reading(None), LatencyResult::Absent);
        assert_eq!(LatencyResult::from_reading(Some(-1.0)), LatencyResult::Error);
        assert_eq!(LatencyResult::from_reading(Some(f64::NAN)), LatencyResult::Error);
        assert_eq!(LatencyResult::from_reading(Some(f64::INFINITY)), LatencyResult::Error);
    }

    #[test]
    fn test_value_only_for_measured() {
        assert_eq!(LatencyResult::Measured(7.5).value(), Some(7.5));
        assert_eq!(LatencyResult::Absent.value(), None);
        assert_eq!(LatencyResult::Error.value(), None);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(LatencyResult::Measured(20.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "measured", "ms": 20.0 }));

        let json = serde_json::to_value(LatencyResult::Absent).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "absent" }));

        let json = serde_json::to_value(AvailabilityResult::Answered(false)).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "answered", "up": false }));
    }
}
