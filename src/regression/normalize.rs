// Snapshot normalization
//
// Collapses raw records into one latency per operation key. Records with an
// empty scope or a percentile at or below epsilon are dropped. Colliding keys
// are last-write-wins in input order.

use crate::snapshot::{Labels, MeasurementRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Canonical identity of an API call shape: `"<verb> <scope>/<resource>[/<subresource>]"`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationKey(String);

impl OperationKey {
    pub fn from_labels(labels: &Labels) -> Self {
        let mut key = format!("{} {}/{}", labels.verb, labels.scope, labels.resource);
        if !labels.subresource.is_empty() {
            key.push('/');
            key.push_str(&labels.subresource);
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OperationKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

/// Mapping from operation key to a single latency
pub type NormalizedSnapshot = BTreeMap<OperationKey, Duration>;

/// Whether a record is a real measurement
pub fn is_measurement(record: &MeasurementRecord, epsilon: f64) -> bool {
    !record.labels.scope.is_empty() && record.data.perc99 > epsilon
}

/// Convert a millisecond percentile into a duration, truncated to whole milliseconds
pub fn latency_from_ms(ms: f64) -> Duration {
    // `as` saturates: negatives and NaN become 0, overflow becomes u64::MAX
    Duration::from_millis(ms as u64)
}

/// Normalize raw records into a [`NormalizedSnapshot`]
///
/// Never fails: records that are not real measurements are silently excluded.
///
/// # Example
/// ```
/// use api_responsiveness::regression::{normalize, OperationKey};
/// use api_responsiveness::snapshot::MeasurementRecord;
///
/// let records = vec![
///     MeasurementRecord::new("GET", "cluster", "pods", 120.0),
///     MeasurementRecord::new("LIST", "", "nodes", 80.0), // no scope: dropped
/// ];
/// let snapshot = normalize(&records, 1e-5);
/// assert_eq!(snapshot.len(), 1);
/// assert_eq!(snapshot[&OperationKey::from("GET cluster/pods")].as_millis(), 120);
/// ```
pub fn normalize(records: &[MeasurementRecord], epsilon: f64) -> NormalizedSnapshot {
    let mut snapshot = NormalizedSnapshot::new();

    for record in records {
        if !is_measurement(record, epsilon) {
            tracing::debug!(
                "Dropping record {} (scope={:?}, perc99={})",
                record.labels.as_key(),
                record.labels.scope,
                record.data.perc99
            );
            continue;
        }

        let key = record.labels.as_key();
        let latency = latency_from_ms(record.data.perc99);
        if let Some(previous) = snapshot.insert(key.clone(), latency) {
            tracing::debug!(
                "Duplicate key {}: {:?} overwritten by {:?}",
                key,
                previous,
                latency
            );
        }
    }

    snapshot
}
