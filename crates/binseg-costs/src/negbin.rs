// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::model::{CostModel, is_degenerate_variance, segment_size};
use crate::validation::validate_counts;
use binseg_core::{Result, StatisticsKind, SummaryStatistics};

/// Negative binomial segment cost with method-of-moments parameters.
///
/// With segment mean `m` and variance `v`, the success probability is
/// `p = m / v` and the size is `r = m^2 / (v - m)`. Cost is the kernel
/// `sum * ln(1 - p) + n * r * ln p`, with the `ln Gamma` terms dropped. Segments
/// that are not overdispersed (`p` outside `(0, 1)`) or have zero variance cost
/// `+inf`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostNegBinomial;

impl CostModel for CostNegBinomial {
    fn name(&self) -> &'static str {
        "negbin"
    }

    fn description(&self) -> &'static str {
        "Negative binomial distribution with change in probability of success"
    }

    fn statistics_kind(&self) -> StatisticsKind {
        StatisticsKind::Squared
    }

    fn segment_parameter_names(&self) -> &'static [&'static str] {
        &["prob"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["before_prob", "after_prob"]
    }

    fn validate(&self, values: &[f64]) -> Result<()> {
        validate_counts(self.name(), values)
    }

    fn segment_cost(&self, stats: &SummaryStatistics, start: usize, end: usize) -> Result<f64> {
        let Some(n) = segment_size(stats, start, end)? else {
            return Ok(f64::INFINITY);
        };
        let sum = stats.range_sum(start, end)?;
        let var_n = stats.variance_n(start, end, false)?;
        if is_degenerate_variance(var_n, stats.range_sum_of_squares(start, end)?) {
            return Ok(f64::INFINITY);
        }

        let mean = sum / n;
        let var = var_n / n;
        let p = mean / var;
        if !(p > 0.0 && p < 1.0) {
            return Ok(f64::INFINITY);
        }
        let r = mean * mean / (var - mean);
        Ok(sum * (1.0 - p).ln() + n * r * p.ln())
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
        let mean = stats.mean(start, end)?;
        let var = stats.variance_n(start, end, false)? / n;
        Ok(vec![mean / var])
    }
}
