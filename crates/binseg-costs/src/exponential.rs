// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::model::{CostModel, segment_size};
use crate::validation::validate_non_negative;
use binseg_core::{Result, StatisticsKind, SummaryStatistics};

/// Exponential segment cost with MLE rate `n / sum`.
///
/// Cost is `-n * (ln n - ln sum)`, the negative log-likelihood without the
/// constant `+n` term. Segments summing to zero cost `+inf`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostExponentialRate;

impl CostModel for CostExponentialRate {
    fn name(&self) -> &'static str {
        "exponential"
    }

    fn description(&self) -> &'static str {
        "Exponential distribution with change in rate"
    }

    fn statistics_kind(&self) -> StatisticsKind {
        StatisticsKind::Linear
    }

    fn segment_parameter_names(&self) -> &'static [&'static str] {
        &["rate"]
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        &["before_rate", "after_rate"]
    }

    fn validate(&self, values: &[f64]) -> Result<()> {
        validate_non_negative(self.name(), values)
    }

    fn segment_cost(&self, stats: &SummaryStatistics, start: usize, end: usize) -> Result<f64> {
        let Some(n) = segment_size(stats, start, end)? else {
            return Ok(f64::INFINITY);
        };
        let sum = stats.range_sum(start, end)?;
        if !(sum > 0.0) {
            return Ok(f64::INFINITY);
        }
        Ok(-n * (n.ln() - sum.ln()))
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
        Ok(vec![n / stats.range_sum(start, end)?])
    }
}
