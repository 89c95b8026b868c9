// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use binseg_core::{
    BinSegError, FittedParams, ReproMode, Result, StatisticsKind, SummaryStatistics,
};
use std::fmt;
use tracing::{debug, trace};

/// `ln(2π)`.
pub(crate) const LOG_2PI: f64 = 1.837_877_066_409_345_3;

/// Relative round-off floor below which an un-normalized variance counts as zero.
pub(crate) const DEGENERATE_VARIANCE_REL_TOL: f64 = 8.0 * f64::EPSILON;

/// Segment cost contract shared by every distribution family.
///
/// Segments are inclusive index ranges `[start, end]`. Lower cost means a
/// better fit; most models return a negative log-likelihood up to terms that
/// do not depend on the segmentation. A
/// degenerate segment (zero variance, zero rate, ...) costs `+inf`; that is
/// how splits producing such segments are rejected. Implementations are
/// stateless and read the series only through [`SummaryStatistics`].
pub trait CostModel: fmt::Debug + Send + Sync {
    /// Registry name, e.g. `mean_norm`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Prefix aggregates this model queries.
    fn statistics_kind(&self) -> StatisticsKind;

    /// Names of the parameters fitted for a single segment, e.g. `["mean"]`.
    fn segment_parameter_names(&self) -> &'static [&'static str];

    /// Names reported for a split: `before_*`/`after_*` pairs, one pair per
    /// entry of [`Self::segment_parameter_names`], in the same order.
    fn parameter_names(&self) -> &'static [&'static str];

    /// Checks that `values` lie in the distribution's support.
    fn validate(&self, values: &[f64]) -> Result<()> {
        crate::validation::validate_finite(self.name(), values)
    }

    /// Validates `values` and builds the statistics this model needs.
    fn precompute(&self, values: &[f64], repro_mode: ReproMode) -> Result<SummaryStatistics> {
        if let Err(err) = self.validate(values) {
            debug!(cost_model = self.name(), n = values.len(), %err, "input rejected");
            return Err(err);
        }
        trace!(
            cost_model = self.name(),
            n = values.len(),
            kind = ?self.statistics_kind(),
            ?repro_mode,
            "precomputing summary statistics"
        );
        Ok(SummaryStatistics::new(
            values,
            self.statistics_kind(),
            repro_mode,
        ))
    }

    /// Cost of modelling `[start, end]` as one homogeneous segment.
    fn segment_cost(&self, stats: &SummaryStatistics, start: usize, end: usize) -> Result<f64>;

    /// Cost of `[start, mid]` plus cost of `[mid + 1, end]`.
    fn split_cost(
        &self,
        stats: &SummaryStatistics,
        start: usize,
        mid: usize,
        end: usize,
    ) -> Result<f64> {
        let left = self.segment_cost(stats, start, mid)?;
        let right = self.segment_cost(stats, mid + 1, end)?;
        Ok(left + right)
    }

    /// Fitted parameter values of `[start, end]`, ordered as
    /// [`Self::segment_parameter_names`].
    fn fit_segment(&self, stats: &SummaryStatistics, start: usize, end: usize)
    -> Result<Vec<f64>>;

    /// Named fitted parameters of `[start, end]`.
    fn segment_params(
        &self,
        stats: &SummaryStatistics,
        start: usize,
        end: usize,
    ) -> Result<FittedParams> {
        let values = self.fit_segment(stats, start, end)?;
        Ok(self
            .segment_parameter_names()
            .iter()
            .copied()
            .zip(values)
            .collect())
    }

    /// Named fitted parameters of the two children of a split at `mid`.
    ///
    /// Reporting only; the split search never reads these.
    fn derive_params(
        &self,
        stats: &SummaryStatistics,
        start: usize,
        mid: usize,
        end: usize,
    ) -> Result<FittedParams> {
        let before = self.fit_segment(stats, start, mid)?;
        let after = self.fit_segment(stats, mid + 1, end)?;
        let names = self.parameter_names();
        if names.len() != before.len() * 2 || before.len() != after.len() {
            return Err(BinSegError::numerical_issue(format!(
                "{} reports {} parameter names for {} fitted values per segment",
                self.name(),
                names.len(),
                before.len()
            )));
        }

        let mut params = FittedParams::with_capacity(names.len());
        for (pair, (left, right)) in names.chunks_exact(2).zip(before.into_iter().zip(after)) {
            params.push(pair[0], left);
            params.push(pair[1], right);
        }
        Ok(params)
    }
}

/// Length of `[start, end]` as `f64`, or `None` for an empty range.
///
/// Fails with [`BinSegError::Index`] when `end` lies past the series.
pub(crate) fn segment_size(
    stats: &SummaryStatistics,
    start: usize,
    end: usize,
) -> Result<Option<f64>> {
    if end >= stats.len() {
        return Err(BinSegError::index(start, end, stats.len()));
    }
    if start > end {
        return Ok(None);
    }
    Ok(Some((end - start + 1) as f64))
}

/// True when `var_n` is zero, negative, `NaN`, or lost in the round-off of `scale`.
pub(crate) fn is_degenerate_variance(var_n: f64, scale: f64) -> bool {
    !(var_n > DEGENERATE_VARIANCE_REL_TOL * scale.abs())
}

/// Gaussian negative log-likelihood with MLE variance `var_n / n`.
pub(crate) fn gaussian_cost(n: f64, var_n: f64) -> f64 {
    n * (LOG_2PI + (var_n / n).ln() + 1.0)
}
