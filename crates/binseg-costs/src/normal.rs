// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Gaussian cost models.
//!
//! All three are negative log-likelihoods with MLE parameters. The mean-only
//! model drops every term that is constant in the segmentation, so its costs
//! are only comparable with each other.

use crate::model::{CostModel, gaussian_cost, is_degenerate_variance, segment_size};
use binseg_core::{Result, StatisticsKind, SummaryStatistics};

/// Change in mean under constant variance: `-(sum^2) / n`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostNormalMean;

impl CostModel for CostNormalMean {
    fn name(&self) -> &'static str {
        "mean_norm"
    }

    fn description(&self) -> &'static str {
        "Normal distribution with change in mean and constant variance"
    }

    fn statistics_kind(&self) -> StatisticsKind {
        StatisticsKind::Linear
    }

    fn segment_parameter_names(&self) -> &'static [&'static str] {
        &["mean"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["before_mean", "after_mean"]
    }

    fn segment_cost(&self, stats: &SummaryStatistics, start: usize, end: usize) -> Result<f64> {
        let Some(n) = segment_size(stats, start, end)? else {
            return Ok(f64::INFINITY);
        };
        let sum = stats.range_sum(start, end)?;
        Ok(-(sum * sum) / n)
    }

    fn fit_segment(
        &self,
        stats: &SummaryStatistics,
        start: usize,
        end: usize,
    ) -> Result<Vec<f64>> {
        Ok(vec![stats.mean(start, end)?])
    }
}

/// Change in variance around the series-wide mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostNormalVar;

impl CostModel for CostNormalVar {
    fn name(&self) -> &'static str {
        "var_norm"
    }

    fn description(&self) -> &'static str {
        "Normal distribution with change in variance and constant mean"
    }

    fn statistics_kind(&self) -> StatisticsKind {
        StatisticsKind::Squared
    }

    fn segment_parameter_names(&self) -> &'static [&'static str] {
        &["var"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["before_var", "after_var"]
    }

    fn segment_cost(&self, stats: &SummaryStatistics, start: usize, end: usize) -> Result<f64> {
        let Some(n) = segment_size(stats, start, end)? else {
            return Ok(f64::INFINITY);
        };
        let var_n = stats.variance_n(start, end, true)?;
        let mu = stats.total_mean();
        let scale = stats.range_sum_of_squares(start, end)? + n * mu * mu;
        if is_degenerate_variance(var_n, scale) {
            return Ok(f64::INFINITY);
        }
        Ok(gaussian_cost(n, var_n))
    }

    fn fit_segment(
        &self,
        stats: &SummaryStatistics,
        start: usize,
        end: usize,
    ) -> Result<Vec<f64>> {
        let Some(n) = segment_size(stats, start, end)? else {
            return Ok(vec![f64::NAN]);
        };
        Ok(vec![stats.variance_n(start, end, true)? / n])
    }
}

/// Change in both mean and variance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostNormalMeanVar;

impl CostModel for CostNormalMeanVar {
    fn name(&self) -> &'static str {
        "meanvar_norm"
    }

    fn description(&self) -> &'static str {
        "Normal distribution with change in both mean and variance"
    }

    fn statistics_kind(&self) -> StatisticsKind {
        StatisticsKind::Squared
    }

    fn segment_parameter_names(&self) -> &'static [&'static str] {
        &["mean", "var"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["before_mean", "after_mean", "before_var", "after_var"]
    }

    fn segment_cost(&self, stats: &SummaryStatistics, start: usize, end: usize) -> Result<f64> {
        let Some(n) = segment_size(stats, start, end)? else {
            return Ok(f64::INFINITY);
        };
        let var_n = stats.variance_n(start, end, false)?;
        if is_degenerate_variance(var_n, stats.range_sum_of_squares(start, end)?) {
            return Ok(f64::INFINITY);
        }
        Ok(gaussian_cost(n, var_n))
    }

    fn fit_segment(
        &self,
        stats: &SummaryStatistics,
        start: usize,
        end: usize,
    ) -> Result<Vec<f64>> {
        let Some(n) = segment_size(stats, start, end)? else {
            return Ok(vec![f64::NAN, f64::NAN]);
        };
        Ok(vec![
            stats.mean(start, end)?,
            stats.variance_n(start, end, false)? / n,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::{CostNormalMean, CostNormalMeanVar, CostNormalVar};
    use crate::model::{CostModel, LOG_2PI};
    use binseg_core::{BinSegError, ReproMode};

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "expected {expected}, got {actual}, |diff|={diff}, tol={tol}"
        );
    }

    fn naive_var_n(values: &[f64], mean: f64) -> f64 {
        values.iter().map(|v| (v - mean) * (v - mean)).sum()
    }

    fn step_series() -> Vec<f64> {
        let mut values = vec![0.0; 5];
        values.extend([10.0; 5]);
        values
    }

    #[test]
    fn mean_norm_matches_closed_form_on_step_series() {
        let model = CostNormalMean;
        let stats = model
            .precompute(&step_series(), ReproMode::Balanced)
            .expect("precompute should succeed");

        assert_close(model.segment_cost(&stats, 0, 9).expect("cost"), -250.0, 1e-12);
        assert_close(model.segment_cost(&stats, 0, 4).expect("cost"), 0.0, 1e-12);
        assert_close(model.segment_cost(&stats, 5, 9).expect("cost"), -500.0, 1e-12);
        assert_close(
            model.split_cost(&stats, 0, 4, 9).expect("split cost"),
            -500.0,
            1e-12,
        );
    }

    #[test]
    fn mean_norm_constant_segment_costs_minus_n_v_squared() {
        let model = CostNormalMean;
        let stats = model
            .precompute(&[3.0; 7], ReproMode::Balanced)
            .expect("precompute should succeed");
        assert_close(model.segment_cost(&stats, 0, 6).expect("cost"), -63.0, 1e-12);
    }

    #[test]
    fn mean_norm_params_are_segment_means() {
        let model = CostNormalMean;
        let stats = model
            .precompute(&step_series(), ReproMode::Balanced)
            .expect("precompute should succeed");
        let params = model.derive_params(&stats, 0, 4, 9).expect("params");
        assert_eq!(
            params.names().collect::<Vec<_>>(),
            vec!["before_mean", "after_mean"]
        );
        assert_close(params.get("before_mean").expect("before"), 0.0, 1e-12);
        assert_close(params.get("after_mean").expect("after"), 10.0, 1e-12);

        let whole = model.segment_params(&stats, 0, 9).expect("segment params");
        assert_close(whole.get("mean").expect("mean"), 5.0, 1e-12);
    }

    #[test]
    fn var_norm_uses_series_mean() {
        let values = [1.0, -1.0, 2.0, -2.0, 4.0, 0.0];
        let model = CostNormalVar;
        let stats = model
            .precompute(&values, ReproMode::Balanced)
            .expect("precompute should succeed");
        let mu = values.iter().sum::<f64>() / values.len() as f64;

        let seg = &values[0..3];
        let var = naive_var_n(seg, mu) / 3.0;
        let expected = 3.0 * (LOG_2PI + var.ln() + 1.0);
        assert_close(model.segment_cost(&stats, 0, 2).expect("cost"), expected, 1e-10);

        let fitted = model.fit_segment(&stats, 0, 2).expect("fit");
        assert_close(fitted[0], var, 1e-12);
    }

    #[test]
    fn var_norm_single_point_at_series_mean_is_degenerate() {
        let model = CostNormalVar;
        let stats = model
            .precompute(&[1.0, 2.0, 3.0], ReproMode::Balanced)
            .expect("precompute should succeed");
        assert_eq!(
            model.segment_cost(&stats, 1, 1).expect("cost"),
            f64::INFINITY
        );
        assert!(model.segment_cost(&stats, 0, 0).expect("cost").is_finite());
    }

    #[test]
    fn meanvar_norm_matches_naive_likelihood() {
        let values = [0.5, 1.5, -0.25, 2.0, 3.5, 1.0, 0.0];
        let model = CostNormalMeanVar;
        let stats = model
            .precompute(&values, ReproMode::Strict)
            .expect("precompute should succeed");

        let seg = &values[2..7];
        let mean = seg.iter().sum::<f64>() / seg.len() as f64;
        let var = naive_var_n(seg, mean) / seg.len() as f64;
        let expected = seg.len() as f64 * (var.ln() + LOG_2PI + 1.0);
        assert_close(model.segment_cost(&stats, 2, 6).expect("cost"), expected, 1e-10);

        let params = model.derive_params(&stats, 0, 1, 6).expect("params");
        assert_eq!(
            params.names().collect::<Vec<_>>(),
            vec!["before_mean", "after_mean", "before_var", "after_var"]
        );
        assert_close(params.get("before_mean").expect("before"), 1.0, 1e-12);
        assert_close(params.get("before_var").expect("before"), 0.25, 1e-12);
        assert_close(params.get("after_mean").expect("after"), mean, 1e-12);
        assert_close(params.get("after_var").expect("after"), var, 1e-12);
    }

    #[test]
    fn meanvar_norm_constant_segment_is_infinite() {
        let model = CostNormalMeanVar;
        let stats = model
            .precompute(&[0.1, 0.1, 0.1, 5.0], ReproMode::Balanced)
            .expect("precompute should succeed");
        assert_eq!(
            model.segment_cost(&stats, 0, 2).expect("cost"),
            f64::INFINITY
        );
        assert_eq!(
            model.segment_cost(&stats, 3, 3).expect("cost"),
            f64::INFINITY
        );
        assert!(model.segment_cost(&stats, 0, 3).expect("cost").is_finite());
    }

    #[test]
    fn empty_range_costs_infinity_and_out_of_range_errors() {
        let model = CostNormalMean;
        let stats = model
            .precompute(&[1.0, 2.0], ReproMode::Balanced)
            .expect("precompute should succeed");
        assert_eq!(
            model.segment_cost(&stats, 1, 0).expect("empty"),
            f64::INFINITY
        );
        assert!(matches!(
            model.segment_cost(&stats, 0, 2),
            Err(BinSegError::Index { .. })
        ));
    }

    #[test]
    fn squared_models_reject_non_finite_input() {
        let err = CostNormalMeanVar
            .precompute(&[1.0, f64::NAN], ReproMode::Balanced)
            .expect_err("NaN must be rejected");
        assert!(matches!(err, BinSegError::InvalidInput(_)));
    }
}
