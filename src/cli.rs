//! CLI argument parsing for api-responsiveness

use crate::regression::{ComparatorConfig, DEFAULT_EPSILON};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// What to do with the result snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Compare the result against --baseline (default)
    Compare,
    /// List operations by call count, highest first
    Sort,
}

/// Output format for the compare report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "api-responsiveness")]
#[command(version)]
#[command(about = "Compare API latency snapshots and report per-operation regressions", long_about = None)]
pub struct Cli {
    /// Path to the result (candidate) snapshot
    #[arg(value_name = "RESULT")]
    pub result: PathBuf,

    /// Path to the baseline snapshot (required in compare mode)
    #[arg(short, long, value_name = "PATH")]
    pub baseline: Option<PathBuf>,

    /// Mode of operation
    #[arg(short, long, value_enum, default_value = "compare")]
    pub mode: Mode,

    /// Failure threshold: allowed relative slowdown (0.1 = 10%)
    #[arg(short, long, value_name = "RATIO", default_value = "0.1")]
    pub threshold: f64,

    /// Noise floor in milliseconds; faster results are never flagged
    #[arg(long = "min-duration-ms", value_name = "MS", default_value = "50")]
    pub min_duration_ms: u64,

    /// Measurements at or below this value are ignored
    #[arg(long, value_name = "F", default_value_t = DEFAULT_EPSILON)]
    pub epsilon: f64,

    /// Exit with status 1 when any operation regressed
    #[arg(long = "fail-on-regression")]
    pub fail_on_regression: bool,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Comparator configuration assembled from the flags
    pub fn comparator_config(&self) -> ComparatorConfig {
        ComparatorConfig::default()
            .with_threshold_ratio(self.threshold)
            .with_min_duration(Duration::from_millis(self.min_duration_ms))
            .with_epsilon(self.epsilon)
            .with_fail_on_regression(self.fail_on_regression)
    }
}
