//! api-responsiveness - API latency regression comparator
//!
//! This library compares two snapshots of per-operation API percentile
//! latencies (a baseline run and a candidate run) and classifies every
//! candidate operation as OK, regressed, or missing from the baseline.
//! Snapshots can be loaded from the JSON files load tests emit, or built
//! in memory by any other producer.

pub mod cli;
pub mod error;
pub mod json_output;
pub mod regression;
pub mod report;
pub mod snapshot;
