//! API responsiveness snapshot model
//!
//! A snapshot is the JSON document produced by a load-test run:
//!
//! ```json
//! { "DataItems": [ { "Data": { "Perc99": 12.5 },
//!                    "labels": { "Verb": "GET", "Scope": "cluster",
//!                                "Resource": "pods", "Subresource": "",
//!                                "Count": "42" } } ] }
//! ```
//!
//! Files are read and parsed in full before any comparison starts.

use crate::error::{ComparatorError, Result};
use crate::regression::OperationKey;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Full snapshot of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponsiveness {
    #[serde(rename = "DataItems", default)]
    pub data_items: Vec<MeasurementRecord>,
}

/// One observed data point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    #[serde(rename = "Data", default)]
    pub data: Data,
    #[serde(rename = "labels", default)]
    pub labels: Labels,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Data {
    /// 99th-percentile latency in milliseconds
    #[serde(rename = "Perc99", default)]
    pub perc99: f64,
}

/// Operation labels attached to a record
///
/// An empty `scope` marks an entry that is not a countable API call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    #[serde(rename = "Resource", default)]
    pub resource: String,
    #[serde(rename = "Scope", default)]
    pub scope: String,
    #[serde(rename = "Subresource", default)]
    pub subresource: String,
    #[serde(rename = "Verb", default)]
    pub verb: String,
    /// Number of calls observed, string-encoded
    #[serde(rename = "Count", default)]
    pub count: String,
}

impl Labels {
    /// Canonical key: `"<verb> <scope>/<resource>[/<subresource>]"`
    pub fn as_key(&self) -> OperationKey {
        OperationKey::from_labels(self)
    }

    /// Parse the occurrence count
    ///
    /// A count that is not an integer is an input-integrity error.
    pub fn count(&self) -> Result<i64> {
        self.count
            .trim()
            .parse::<i64>()
            .map_err(|_| ComparatorError::InvalidCount {
                key: self.as_key().to_string(),
                count: self.count.clone(),
            })
    }
}

impl MeasurementRecord {
    /// Build a record with the given labels and latency (no subresource, no count)
    pub fn new(verb: &str, scope: &str, resource: &str, perc99_ms: f64) -> Self {
        Self {
            data: Data { perc99: perc99_ms },
            labels: Labels {
                resource: resource.to_string(),
                scope: scope.to_string(),
                verb: verb.to_string(),
                ..Labels::default()
            },
        }
    }

    pub fn with_subresource(mut self, subresource: &str) -> Self {
        self.labels.subresource = subresource.to_string();
        self
    }

    pub fn with_count(mut self, count: &str) -> Self {
        self.labels.count = count.to_string();
        self
    }

    /// Percentile latency in milliseconds
    pub fn percentile_latency_ms(&self) -> f64 {
        self.data.perc99
    }
}

impl ApiResponsiveness {
    pub fn new(data_items: Vec<MeasurementRecord>) -> Self {
        Self { data_items }
    }

    /// Parse a snapshot from a JSON string
    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Load and parse a snapshot from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        if !path_ref.exists() {
            return Err(ComparatorError::FileNotFound(
                path_ref.display().to_string(),
            ));
        }

        let contents = fs::read_to_string(path_ref)?;
        let snapshot = Self::from_json_str(&contents).map_err(|e| match e {
            ComparatorError::MalformedInput(msg) => {
                ComparatorError::MalformedInput(format!("{}: {}", path_ref.display(), msg))
            }
            other => other,
        })?;

        tracing::debug!(
            "Loaded {} records from {}",
            snapshot.data_items.len(),
            path_ref.display()
        );
        Ok(snapshot)
    }

    pub fn records(&self) -> &[MeasurementRecord] {
        &self.data_items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "DataItems": [
            {
                "Data": { "Perc50": 1.2, "Perc90": 3.4, "Perc99": 12.5 },
                "Unit": "ms",
                "labels": {
                    "Resource": "pods",
                    "Scope": "namespace",
                    "Subresource": "status",
                    "Verb": "PATCH",
                    "Count": "42"
                }
            },
            {
                "Data": { "Perc99": 0 },
                "labels": { "Resource": "nodes", "Verb": "LIST" }
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample_snapshot() {
        let snapshot = ApiResponsiveness::from_json_str(SAMPLE).unwrap();
        assert_eq!(snapshot.data_items.len(), 2);

        let first = &snapshot.data_items[0];
        assert_eq!(first.percentile_latency_ms(), 12.5);
        assert_eq!(first.labels.verb, "PATCH");
        assert_eq!(first.labels.count().unwrap(), 42);
        assert_eq!(first.labels.as_key().as_str(), "PATCH namespace/pods/status");

        // Missing labels default to empty strings
        let second = &snapshot.data_items[1];
        assert_eq!(second.labels.scope, "");
        assert_eq!(second.labels.count, "");
    }

    #[test]
    fn test_missing_data_items_is_empty_snapshot() {
        let snapshot = ApiResponsiveness::from_json_str("{}").unwrap();
        assert!(snapshot.records().is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = ApiResponsiveness::from_json_str("{\"DataItems\": [").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_wrong_type_is_error() {
        let err = ApiResponsiveness::from_json_str(r#"{"DataItems": [{"Data": {"Perc99": "fast"}}]}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_count_not_integer() {
        let record = MeasurementRecord::new("GET", "cluster", "pods", 1.0).with_count("12.5");
        let err = record.labels.count().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("GET cluster/pods"));
    }

    #[test]
    fn test_empty_count_is_error() {
        let record = MeasurementRecord::new("GET", "cluster", "pods", 1.0);
        assert!(record.labels.count().is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = ApiResponsiveness::from_file("/nonexistent/snapshot.json").unwrap_err();
        assert!(matches!(err, ComparatorError::FileNotFound(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_from_file_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let snapshot = ApiResponsiveness::from_file(file.path()).unwrap();
        assert_eq!(snapshot.data_items.len(), 2);
    }

    #[test]
    fn test_from_file_malformed_names_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let err = ApiResponsiveness::from_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err
            .to_string()
            .contains(&file.path().display().to_string()));
    }
}
