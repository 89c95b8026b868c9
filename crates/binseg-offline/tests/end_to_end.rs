// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use binseg_core::{BinSegError, ExecutionContext, ReproMode, SegmentationParams};
use binseg_offline::{Catalog, list_algorithms, list_distributions, segment};
use std::thread;

fn step_series() -> Vec<f64> {
    let mut values = vec![0.0; 5];
    values.extend([10.0; 5]);
    values
}

fn assert_close(actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "expected {expected}, got {actual}, |diff|={diff}, tol={tol}"
    );
}

/// Deterministic noise in `[-0.5, 0.5)` from an LCG.
fn noise(seed: u64, n: usize) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            ((state >> 11) as f64 / (1u64 << 53) as f64) - 0.5
        })
        .collect()
}

#[test]
fn step_series_splits_at_index_four() {
    let table = segment(&step_series(), "BS", "mean_norm", 1, 1).expect("segment should succeed");

    assert_eq!(table.len(), 1);
    let row = &table.rows()[0];
    assert_eq!(row.split_index, 4);
    assert!(row.cost_decrease > 0.0);
    assert_close(row.params.get("before_mean").expect("before_mean"), 0.0, 1e-12);
    assert_close(row.params.get("after_mean").expect("after_mean"), 10.0, 1e-12);
    assert_eq!(
        table.to_matrix(),
        vec![vec![1.0, 4.0, 0.0, 0.0, -500.0, 0.0, 10.0]]
    );
}

#[test]
fn short_series_with_large_min_segment_len_has_no_splits() {
    let table =
        segment(&[1.0, 5.0, 2.0, 8.0], "BS", "mean_norm", 1, 3).expect("not an error");
    assert!(table.is_empty());
}

#[test]
fn zero_changepoints_is_empty() {
    let table = segment(&step_series(), "BS", "mean_norm", 0, 1).expect("segment should succeed");
    assert!(table.is_empty());
    assert_close(table.initial_cost, -250.0, 1e-9);
}

#[test]
fn configuration_errors_precede_any_work() {
    let err = segment(&step_series(), "BS", "mean_norm", 10, 1).expect_err("k >= n must fail");
    assert!(matches!(err, BinSegError::Configuration(_)));

    let err = segment(&step_series(), "BS", "mean_norm", 1, 0).expect_err("min 0 must fail");
    assert!(matches!(err, BinSegError::Configuration(_)));

    let err = segment(&[], "BS", "mean_norm", 0, 1).expect_err("empty input must fail");
    assert!(matches!(err, BinSegError::Configuration(_)));
}

/// Overdispersed counts whose level and spread jump after index 39.
fn count_step() -> Vec<f64> {
    let mut values = [0.0, 5.0, 1.0, 9.0, 2.0].repeat(8);
    values.extend([20.0, 45.0, 30.0, 60.0, 25.0].repeat(8));
    values
}

/// Positive durations whose scale jumps after index 39.
fn rate_step() -> Vec<f64> {
    let mut values = [1.0, 2.0, 0.5, 3.0, 1.5].repeat(8);
    values.extend([20.0, 40.0, 10.0, 60.0, 30.0].repeat(8));
    values
}

/// Noise whose spread grows thirtyfold after index 79.
fn variance_step() -> Vec<f64> {
    noise(11, 160)
        .iter()
        .enumerate()
        .map(|(i, v)| if i < 80 { v * 0.2 } else { v * 6.0 })
        .collect()
}

#[test]
fn every_distribution_detects_its_change() {
    let cases: [(&str, Vec<f64>, std::ops::RangeInclusive<usize>); 6] = [
        ("mean_norm", count_step(), 39..=39),
        ("poisson", count_step(), 39..=39),
        ("negbin", count_step(), 39..=39),
        ("exponential", rate_step(), 39..=39),
        ("var_norm", variance_step(), 75..=85),
        ("meanvar_norm", variance_step(), 75..=85),
    ];
    assert_eq!(cases.len(), list_distributions().len());

    for (name, values, expected) in cases {
        let table = segment(&values, "BS", name, 1, 5)
            .unwrap_or_else(|err| panic!("{name} should segment: {err}"));
        assert_eq!(table.len(), 1, "{name} found no change");
        let row = &table.rows()[0];
        assert!(
            expected.contains(&row.split_index),
            "{name} split at {}",
            row.split_index
        );
        assert!(row.cost_decrease > 0.0, "{name}");
        assert_eq!(table.column_names().count(), 5 + row.params.len(), "{name}");
        assert_eq!(row.values().len(), 5 + row.params.len(), "{name}");
    }
}

#[test]
fn negbin_reports_success_probabilities_around_the_change() {
    let table = segment(&count_step(), "BS", "negbin", 1, 5).expect("segment should succeed");
    assert_eq!(table.change_points(), vec![39]);

    let row = &table.rows()[0];
    assert_close(row.cost_decrease, 569.237_306, 1e-4);
    assert_close(
        row.params.get("before_prob").expect("before_prob"),
        3.4 / 10.64,
        1e-9,
    );
    assert_close(
        row.params.get("after_prob").expect("after_prob"),
        36.0 / 214.0,
        1e-9,
    );
}

#[test]
fn mean_shift_in_noise_is_recovered() {
    let mut values = noise(7, 200);
    for value in values.iter_mut().skip(120) {
        *value += 4.0;
    }
    let table = segment(&values, "BS", "mean_norm", 1, 5).expect("segment should succeed");
    assert_eq!(table.change_points(), vec![119]);
}

#[test]
fn variance_change_is_recovered_by_var_and_meanvar() {
    let values = variance_step();

    for name in ["var_norm", "meanvar_norm"] {
        let table = segment(&values, "BS", name, 1, 5).expect("segment should succeed");
        let split = table.change_points()[0];
        assert!((75..=85).contains(&split), "{name} split at {split}");
    }
}

#[test]
fn repro_modes_agree_on_change_points() {
    let mut values = noise(3, 300);
    for value in values.iter_mut().skip(100).take(100) {
        *value += 2.5;
    }

    let catalog = Catalog::builtin();
    let params = SegmentationParams::new(2, 10);
    let points: Vec<Vec<usize>> = [ReproMode::Strict, ReproMode::Balanced, ReproMode::Fast]
        .into_iter()
        .map(|mode| {
            catalog
                .segment_with_context(
                    &values,
                    "BS",
                    "mean_norm",
                    &params,
                    &ExecutionContext::new().with_repro_mode(mode),
                )
                .expect("segment should succeed")
                .change_points()
        })
        .collect();

    assert_eq!(points[0], vec![99, 199]);
    assert!(points.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn identical_inputs_give_identical_tables() {
    let values = noise(5, 128);
    let first = segment(&values, "BS", "meanvar_norm", 4, 4).expect("segment should succeed");
    let second = segment(&values, "BS", "meanvar_norm", 4, 4).expect("segment should succeed");
    assert_eq!(first, second);
}

#[test]
fn introspection_lists_builtins() {
    assert_eq!(
        list_algorithms().get("BS").map(String::as_str),
        Some("Regular Binary Segmentation")
    );
    assert_eq!(list_distributions().len(), 6);
}

#[test]
fn global_catalog_serves_concurrent_callers() {
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            thread::spawn(move || {
                let mut values = noise(worker, 90);
                for value in values.iter_mut().skip(45) {
                    *value += 6.0;
                }
                segment(&values, "BS", "mean_norm", 1, 3)
                    .expect("segment should succeed")
                    .change_points()
            })
        })
        .collect();

    for handle in handles {
        let points = handle.join().expect("worker should not panic");
        assert_eq!(points, vec![44]);
    }
}
