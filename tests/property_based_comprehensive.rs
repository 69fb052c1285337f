//! Property-based tests for the comparator
//!
//! Covers the normalization filter, last-write-wins collisions, the
//! missing-in-baseline accounting, the noise floor and the ranking order.

use api_responsiveness::regression::{
    classify, normalize, rank_by_volume, NormalizedSnapshot, OperationKey, Verdict,
};
use api_responsiveness::snapshot::MeasurementRecord;
use proptest::prelude::*;
use std::time::Duration;

const EPSILON: f64 = 1e-5;

// Records without a scope never survive normalization
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_empty_scope_always_dropped(
        verb in "[A-Z]{3,6}",
        resource in "[a-z]{1,10}",
        perc99 in 0.0f64..10_000.0,
    ) {
        let records = vec![MeasurementRecord::new(&verb, "", &resource, perc99)];
        prop_assert!(normalize(&records, EPSILON).is_empty());
    }
}

// Records at or below epsilon never survive normalization
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_sub_epsilon_always_dropped(
        scope in "(cluster|namespace|resource)",
        perc99 in 0.0f64..=EPSILON,
    ) {
        let records = vec![MeasurementRecord::new("GET", &scope, "pods", perc99)];
        prop_assert!(normalize(&records, EPSILON).is_empty());
    }
}

// The last record for a key decides the stored latency
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_last_write_wins(values in prop::collection::vec(1.0f64..100_000.0, 1..10)) {
        let records: Vec<MeasurementRecord> = values
            .iter()
            .map(|&v| MeasurementRecord::new("LIST", "cluster", "nodes", v))
            .collect();

        let snapshot = normalize(&records, EPSILON);
        let last = *values.last().unwrap();
        prop_assert_eq!(snapshot.len(), 1);
        prop_assert_eq!(
            snapshot[&OperationKey::from("LIST cluster/nodes")],
            Duration::from_millis(last as u64)
        );
    }
}

// Keys absent from the baseline get exactly one MISSING verdict and no count
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_missing_keys_counted_in_neither(
        candidate in prop::collection::btree_map("[a-z]{1,8}", 1u64..10_000, 0..20),
    ) {
        let candidate: NormalizedSnapshot = candidate
            .into_iter()
            .map(|(k, ms)| (OperationKey::from(format!("GET cluster/{}", k).as_str()), Duration::from_millis(ms)))
            .collect();

        let comparison = classify(&NormalizedSnapshot::new(), &candidate, 0.1, Duration::from_millis(50));

        prop_assert_eq!(comparison.verdicts.len(), candidate.len());
        prop_assert!(comparison.verdicts.values().all(|v| v.verdict == Verdict::MissingInBaseline));
        prop_assert_eq!(comparison.summary.good, 0);
        prop_assert_eq!(comparison.summary.bad, 0);
        prop_assert_eq!(comparison.summary.missing_in_baseline, candidate.len());
    }
}

// Every key present in both runs lands in exactly one of good/bad
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_good_plus_bad_covers_shared_keys(
        pairs in prop::collection::btree_map("[a-z]{1,8}", (1u64..10_000, 1u64..10_000), 0..20),
        threshold in 0.0f64..2.0,
    ) {
        let mut baseline = NormalizedSnapshot::new();
        let mut candidate = NormalizedSnapshot::new();
        for (k, (b, c)) in &pairs {
            let key = OperationKey::from(format!("GET namespace/{}", k).as_str());
            baseline.insert(key.clone(), Duration::from_millis(*b));
            candidate.insert(key, Duration::from_millis(*c));
        }

        let comparison = classify(&baseline, &candidate, threshold, Duration::from_millis(50));
        prop_assert_eq!(comparison.summary.good + comparison.summary.bad, pairs.len());
    }
}

// Candidates at or below the noise floor are never flagged
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_noise_floor_never_regresses(base in 1u64..50, cand in 1u64..=50) {
        let key = OperationKey::from("GET cluster/pods");
        let baseline: NormalizedSnapshot = [(key.clone(), Duration::from_millis(base))].into_iter().collect();
        let candidate: NormalizedSnapshot = [(key, Duration::from_millis(cand))].into_iter().collect();

        let comparison = classify(&baseline, &candidate, 0.0, Duration::from_millis(50));
        prop_assert_eq!(comparison.verdict("GET cluster/pods"), Some(Verdict::Ok));
    }
}

// Ranking output is sorted by count, highest first
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_ranking_is_descending(counts in prop::collection::vec(0i64..1_000_000, 0..30)) {
        let records: Vec<MeasurementRecord> = counts
            .iter()
            .enumerate()
            .map(|(i, c)| {
                MeasurementRecord::new("GET", "cluster", &format!("r{}", i), 1.0)
                    .with_count(&c.to_string())
            })
            .collect();

        let ranked = rank_by_volume(&records).unwrap();
        prop_assert_eq!(ranked.len(), counts.len());
        prop_assert!(ranked.windows(2).all(|w| w[0].0 >= w[1].0));
    }
}
