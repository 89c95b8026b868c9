// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::model::{CostModel, segment_size};
use crate::validation::validate_counts;
use binseg_core::{Result, StatisticsKind, SummaryStatistics};

/// Poisson segment cost model for count/rate changes.
///
/// The returned value uses the negative log-likelihood with MLE rate and omits
/// the per-observation `log(c_i!)` terms and the `+sum` term, neither of which
/// depends on the segmentation. A segment of all zeros costs `+inf`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CostPoissonRate;

impl CostModel for CostPoissonRate {
    fn name(&self) -> &'static str {
        "poisson"
    }

    fn description(&self) -> &'static str {
        "Poisson distribution with change in rate"
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
        validate_counts(self.name(), values)
    }

    fn segment_cost(&self, stats: &SummaryStatistics, start: usize, end: usize) -> Result<f64> {
        let Some(n) = segment_size(stats, start, end)? else {
            return Ok(f64::INFINITY);
        };
        let sum = stats.range_sum(start, end)?;
        let mean = sum / n;
        if !(mean > 0.0) {
            return Ok(f64::INFINITY);
        }
        Ok(-sum * mean.ln())
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
