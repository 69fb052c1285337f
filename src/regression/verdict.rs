// Per-key regression classification
//
// The candidate run drives iteration: keys present only in the baseline are
// never visited. Each candidate key gets exactly one verdict.

use crate::error::Result;
use crate::regression::config::ComparatorConfig;
use crate::regression::normalize::{normalize, NormalizedSnapshot, OperationKey};
use crate::report::format_duration;
use crate::snapshot::ApiResponsiveness;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Classification of a single operation key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Ratio within bound, or candidate below the noise floor
    Ok,
    /// Ratio exceeds bound and candidate is above the noise floor
    Regressed,
    /// Key present in the candidate but not in the baseline (warning only)
    MissingInBaseline,
    /// Baseline latency normalized to zero, so no ratio exists (warning only)
    BaselineZero,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::Regressed => f.write_str("REGRESSED"),
            Self::MissingInBaseline => f.write_str("MISSING_IN_BASELINE"),
            Self::BaselineZero => f.write_str("BASELINE_ZERO"),
        }
    }
}

/// Verdict for one key together with the values it was derived from
#[derive(Debug, Clone, PartialEq)]
pub struct KeyVerdict {
    pub verdict: Verdict,
    /// Baseline latency (`None` when missing in baseline)
    pub baseline: Option<Duration>,
    /// Candidate latency
    pub candidate: Duration,
    /// `candidate / baseline` (`None` when missing or baseline is zero)
    pub ratio: Option<f64>,
}

/// Aggregate counts over all verdicts
///
/// Only `good` and `bad` take part in pass/fail; the other two counters are
/// informational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub good: usize,
    pub bad: usize,
    pub missing_in_baseline: usize,
    pub baseline_zero: usize,
}

impl fmt::Display for ComparisonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "good: {}, bad: {}", self.good, self.bad)
    }
}

/// Full result of comparing two normalized snapshots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    pub verdicts: BTreeMap<OperationKey, KeyVerdict>,
    pub summary: ComparisonSummary,
}

impl Comparison {
    /// Verdict for a key, if the key was present in the candidate
    pub fn verdict(&self, key: &str) -> Option<Verdict> {
        self.verdicts
            .get(&OperationKey::from(key))
            .map(|v| v.verdict)
    }

    /// Keys classified as [`Verdict::Regressed`], in key order
    pub fn regressed_keys(&self) -> Vec<&OperationKey> {
        self.verdicts
            .iter()
            .filter(|(_, v)| v.verdict == Verdict::Regressed)
            .map(|(k, _)| k)
            .collect()
    }

    pub fn has_regressions(&self) -> bool {
        self.summary.bad > 0
    }

    /// Whether the invocation should fail under the given configuration
    pub fn should_fail(&self, config: &ComparatorConfig) -> bool {
        config.fail_on_regression && self.has_regressions()
    }

    /// Generate the line-oriented human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        for (key, result) in &self.verdicts {
            let line = match (result.verdict, result.baseline, result.ratio) {
                (Verdict::Ok, _, _) => format!("OK: {:?}", key.as_str()),
                (Verdict::Regressed, Some(baseline), Some(ratio)) => format!(
                    "WARNING: {:?} took {:.2}x more time than baseline (baseline: {}, result: {})",
                    key.as_str(),
                    ratio,
                    format_duration(baseline),
                    format_duration(result.candidate)
                ),
                (Verdict::Regressed, _, _) => {
                    format!("WARNING: {:?} regressed", key.as_str())
                }
                (Verdict::MissingInBaseline, _, _) => {
                    format!("{:?} missing in the baseline", key.as_str())
                }
                (Verdict::BaselineZero, _, _) => format!(
                    "WARNING: {:?} has zero baseline duration (result: {})",
                    key.as_str(),
                    format_duration(result.candidate)
                ),
            };
            report.push_str(&line);
            report.push('\n');
        }

        report.push_str(&self.summary.to_string());
        report.push('\n');
        report
    }
}

/// Classify every key of `candidate` against `baseline`
///
/// A key regresses when `ratio > 1 + threshold_ratio` and
/// `candidate > min_duration`; both comparisons are strict. Never fails.
///
/// # Example
/// ```
/// use api_responsiveness::regression::{classify, NormalizedSnapshot, OperationKey, Verdict};
/// use std::time::Duration;
///
/// let mut baseline = NormalizedSnapshot::new();
/// baseline.insert(OperationKey::from("GET cluster/pods"), Duration::from_millis(100));
///
/// let mut candidate = NormalizedSnapshot::new();
/// candidate.insert(OperationKey::from("GET cluster/pods"), Duration::from_millis(250));
///
/// let comparison = classify(&baseline, &candidate, 0.1, Duration::from_millis(50));
/// assert_eq!(comparison.verdict("GET cluster/pods"), Some(Verdict::Regressed));
/// assert_eq!(comparison.summary.to_string(), "good: 0, bad: 1");
/// ```
pub fn classify(
    baseline: &NormalizedSnapshot,
    candidate: &NormalizedSnapshot,
    threshold_ratio: f64,
    min_duration: Duration,
) -> Comparison {
    let mut comparison = Comparison::default();
    let bound = 1.0 + threshold_ratio;

    for (key, &value) in candidate {
        let Some(&base_value) = baseline.get(key) else {
            tracing::warn!("{} missing in the baseline", key);
            comparison.summary.missing_in_baseline += 1;
            comparison.verdicts.insert(
                key.clone(),
                KeyVerdict {
                    verdict: Verdict::MissingInBaseline,
                    baseline: None,
                    candidate: value,
                    ratio: None,
                },
            );
            continue;
        };

        if base_value.is_zero() {
            tracing::warn!("{} has zero baseline duration", key);
            comparison.summary.baseline_zero += 1;
            comparison.verdicts.insert(
                key.clone(),
                KeyVerdict {
                    verdict: Verdict::BaselineZero,
                    baseline: Some(base_value),
                    candidate: value,
                    ratio: None,
                },
            );
            continue;
        }

        let ratio = duration_ratio(value, base_value);
        let verdict = if ratio > bound && value > min_duration {
            tracing::warn!(
                "{} took {:.2}x more time than baseline (baseline: {:?}, result: {:?})",
                key,
                ratio,
                base_value,
                value
            );
            comparison.summary.bad += 1;
            Verdict::Regressed
        } else {
            comparison.summary.good += 1;
            Verdict::Ok
        };

        comparison.verdicts.insert(
            key.clone(),
            KeyVerdict {
                verdict,
                baseline: Some(base_value),
                candidate: value,
                ratio: Some(ratio),
            },
        );
    }

    tracing::info!("Comparison finished: {}", comparison.summary);
    comparison
}

/// Normalize both snapshots and classify them under `config`
///
/// Fails only on an invalid configuration.
pub fn compare_snapshots(
    baseline: &ApiResponsiveness,
    candidate: &ApiResponsiveness,
    config: &ComparatorConfig,
) -> Result<Comparison> {
    config.validate()?;

    let baseline = normalize(baseline.records(), config.epsilon);
    let candidate = normalize(candidate.records(), config.epsilon);

    Ok(classify(
        &baseline,
        &candidate,
        config.threshold_ratio,
        config.min_duration,
    ))
}

// Integer nanoseconds are exact in f64 for any realistic latency, so the
// quotient is correctly rounded and boundary ratios like 110/100 land on 1.1.
fn duration_ratio(value: Duration, base: Duration) -> f64 {
    value.as_nanos() as f64 / base.as_nanos() as f64
}
