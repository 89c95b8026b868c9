// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use binseg_offline::segment;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

const MIN_PROPTEST_CASES: u32 = 128;

fn proptest_cases() -> u32 {
    std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .map(|parsed| parsed.max(MIN_PROPTEST_CASES))
        .unwrap_or(MIN_PROPTEST_CASES)
}

fn series_case_strategy() -> impl Strategy<Value = (Vec<f64>, usize, usize)> {
    prop::collection::vec(-100.0f64..100.0, 2..80).prop_flat_map(|values| {
        let n = values.len();
        (Just(values), 0usize..n.min(10), 1usize..=n.min(6))
    })
}

fn count_case_strategy() -> impl Strategy<Value = (Vec<f64>, usize, usize)> {
    prop::collection::vec(0u16..40u16, 2..80).prop_flat_map(|counts| {
        let values: Vec<f64> = counts.into_iter().map(f64::from).collect();
        let n = values.len();
        (Just(values), 0usize..n.min(10), 1usize..=n.min(6))
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: proptest_cases(),
        max_shrink_iters: 1024,
        failure_persistence: Some(Box::new(FileFailurePersistence::Direct("proptest-regressions/tests/proptest_invariants.txt"))),
        .. ProptestConfig::default()
    })]

    #[test]
    fn mean_norm_rows_are_bounded_monotone_and_interior(
        (values, k, min) in series_case_strategy(),
    ) {
        let table = segment(&values, "BS", "mean_norm", k, min)
            .expect("valid parameters should segment");

        prop_assert!(table.len() <= k);
        let mut previous = table.initial_cost;
        let mut seen = std::collections::BTreeSet::new();
        for (idx, row) in table.rows().iter().enumerate() {
            prop_assert_eq!(row.step, idx + 1);
            prop_assert!(row.cost_decrease >= 0.0);
            prop_assert!(row.cumulative_cost <= previous);
            prop_assert!(row.split_index + 1 < values.len());
            prop_assert!(row.invalidates_index < row.step);
            prop_assert!(seen.insert(row.split_index), "duplicate split {}", row.split_index);
            previous = row.cumulative_cost;
        }
    }

    #[test]
    fn splits_leave_at_least_min_segment_len_on_the_right(
        (values, k, min) in series_case_strategy(),
    ) {
        let table = segment(&values, "BS", "mean_norm", k, min)
            .expect("valid parameters should segment");

        let mut bounds = table.change_points();
        bounds.push(values.len() - 1);
        let mut start = 0usize;
        for end in bounds {
            prop_assert!(end + 1 - start >= min, "segment [{}, {}] shorter than {}", start, end, min);
            start = end + 1;
        }
    }

    #[test]
    fn count_models_are_deterministic(
        (values, k, min) in count_case_strategy(),
    ) {
        for name in ["poisson", "negbin"] {
            let first = segment(&values, "BS", name, k, min).expect("counts should segment");
            let second = segment(&values, "BS", name, k, min).expect("counts should segment");
            prop_assert_eq!(first.change_points(), second.change_points());
            prop_assert_eq!(first.to_matrix().len(), second.to_matrix().len());
        }
    }
}
