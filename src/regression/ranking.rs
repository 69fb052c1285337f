// Traffic-volume ranking
//
// Inspection helper: orders the raw records of one snapshot by their
// occurrence count. Unlike normalization, no record is filtered out.

use crate::error::Result;
use crate::regression::normalize::OperationKey;
use crate::snapshot::MeasurementRecord;

/// Rank records by occurrence count, highest first
///
/// The sort is stable, so equal counts keep their input order. The first
/// record whose count is not an integer aborts the ranking.
///
/// # Example
/// ```
/// use api_responsiveness::regression::rank_by_volume;
/// use api_responsiveness::snapshot::MeasurementRecord;
///
/// let records = vec![
///     MeasurementRecord::new("GET", "cluster", "pods", 1.0).with_count("5"),
///     MeasurementRecord::new("LIST", "cluster", "nodes", 1.0).with_count("50"),
/// ];
/// let ranked = rank_by_volume(&records).unwrap();
/// assert_eq!(ranked[0].0, 50);
/// ```
pub fn rank_by_volume(records: &[MeasurementRecord]) -> Result<Vec<(i64, OperationKey)>> {
    let mut ranked = records
        .iter()
        .map(|record| -> Result<(i64, OperationKey)> {
            Ok((record.labels.count()?, record.labels.as_key()))
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    Ok(ranked)
}
