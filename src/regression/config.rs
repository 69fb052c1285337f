// Configuration for ratio-based regression detection
//
// Every constant the comparator uses is carried here so callers (and tests)
// can move the boundaries instead of relying on process-wide flags.

use crate::error::{ComparatorError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default allowed slowdown (10%)
pub const DEFAULT_THRESHOLD_RATIO: f64 = 0.1;

/// Default noise floor below which a candidate is never flagged
pub const DEFAULT_MIN_DURATION: Duration = Duration::from_millis(50);

/// Default epsilon below which a measurement is treated as absent
pub const DEFAULT_EPSILON: f64 = 0.00001;

/// Configuration for ratio-based regression detection
///
/// A candidate latency regresses when
/// `candidate / baseline > 1 + threshold_ratio` **and** `candidate > min_duration`.
///
/// # Example
/// ```
/// use api_responsiveness::regression::ComparatorConfig;
///
/// let config = ComparatorConfig::default();
/// assert_eq!(config.threshold_ratio, 0.1);
/// assert_eq!(config.min_duration.as_millis(), 50);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparatorConfig {
    /// Allowed relative slowdown before a key is flagged
    ///
    /// - 0.1 (default): candidate may be up to 10% slower than baseline
    /// - 0.0: any slowdown above the noise floor is flagged
    pub threshold_ratio: f64,

    /// Noise floor: candidates at or below this latency are always OK
    ///
    /// Sub-threshold absolute latencies are assumed to be jitter in
    /// already-fast operations. Default: 50ms
    #[serde(with = "duration_ms")]
    pub min_duration: Duration,

    /// Measurements at or below this value (in ms) are dropped during normalization
    ///
    /// Guards against zero-initialized or synthetic entries. Default: 1e-5
    pub epsilon: f64,

    /// Whether a nonzero `bad` count should fail the invocation
    ///
    /// Default: false. The comparison result is the same either way; only
    /// the exit status of the CLI changes.
    pub fail_on_regression: bool,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
            min_duration: DEFAULT_MIN_DURATION,
            epsilon: DEFAULT_EPSILON,
            fail_on_regression: false,
        }
    }
}

impl ComparatorConfig {
    /// Create a strict configuration: 5% slowdown allowed, 10ms floor, gating enabled
    pub fn strict() -> Self {
        Self {
            threshold_ratio: 0.05,
            min_duration: Duration::from_millis(10),
            epsilon: DEFAULT_EPSILON,
            fail_on_regression: true,
        }
    }

    /// Create a permissive configuration: 50% slowdown allowed, 100ms floor
    pub fn permissive() -> Self {
        Self {
            threshold_ratio: 0.5,
            min_duration: Duration::from_millis(100),
            epsilon: DEFAULT_EPSILON,
            fail_on_regression: false,
        }
    }

    pub fn with_threshold_ratio(mut self, threshold_ratio: f64) -> Self {
        self.threshold_ratio = threshold_ratio;
        self
    }

    pub fn with_min_duration(mut self, min_duration: Duration) -> Self {
        self.min_duration = min_duration;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_fail_on_regression(mut self, fail_on_regression: bool) -> Self {
        self.fail_on_regression = fail_on_regression;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.threshold_ratio.is_finite() || self.threshold_ratio < 0.0 {
            return Err(ComparatorError::InvalidConfig(format!(
                "threshold_ratio must be a finite value >= 0, got {}",
                self.threshold_ratio
            )));
        }

        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ComparatorError::InvalidConfig(format!(
                "epsilon must be a finite value >= 0, got {}",
                self.epsilon
            )));
        }

        Ok(())
    }
}

/// Serialize a `Duration` as whole milliseconds
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
