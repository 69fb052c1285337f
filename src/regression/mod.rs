// Ratio-based latency regression detection
//
// Two cooperating steps:
// - Normalization: raw per-operation percentile records -> one latency per
//   operation key, dropping entries that are not real measurements
// - Classification: candidate vs. baseline per key, using a ratio bound and
//   an absolute noise floor
//
// A secondary ranking helper orders raw records by traffic volume.

mod config;
mod normalize;
mod ranking;
mod verdict;

pub use config::{
    ComparatorConfig, DEFAULT_EPSILON, DEFAULT_MIN_DURATION, DEFAULT_THRESHOLD_RATIO,
};
pub use normalize::{is_measurement, latency_from_ms, normalize, NormalizedSnapshot, OperationKey};
pub use ranking::rank_by_volume;
pub use verdict::{classify, compare_snapshots, Comparison, ComparisonSummary, KeyVerdict, Verdict};
