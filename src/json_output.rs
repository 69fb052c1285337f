//! JSON output format for comparison reports
//!
//! `--format json`: the same verdicts as the text report, for CI pipelines
//! that gate on structured output instead of scraping lines.

use crate::regression::{ComparatorConfig, Comparison, ComparisonSummary, Verdict};
use serde::{Deserialize, Serialize};

/// Verdict for a single operation key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonVerdict {
    /// Operation key (e.g., "GET cluster/pods")
    pub key: String,
    pub verdict: Verdict,
    /// candidate / baseline (absent when there is no usable baseline)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    /// Baseline latency in milliseconds (absent when missing in baseline)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_ms: Option<u64>,
    /// Candidate latency in milliseconds
    pub result_ms: u64,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Configuration the comparison ran with
    pub config: ComparatorConfig,
    /// One entry per candidate key, in key order
    pub verdicts: Vec<JsonVerdict>,
    pub summary: ComparisonSummary,
}

impl JsonOutput {
    /// Build the JSON report for a finished comparison
    pub fn from_comparison(comparison: &Comparison, config: &ComparatorConfig) -> Self {
        let verdicts = comparison
            .verdicts
            .iter()
            .map(|(key, result)| JsonVerdict {
                key: key.to_string(),
                verdict: result.verdict,
                ratio: result.ratio,
                baseline_ms: result.baseline.map(|d| d.as_millis() as u64),
                result_ms: result.candidate.as_millis() as u64,
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "api-responsiveness-json-v1".to_string(),
            config: config.clone(),
            verdicts,
            summary: comparison.summary,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
