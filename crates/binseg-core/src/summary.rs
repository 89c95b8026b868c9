// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error::{BinSegError, Result};
use crate::repro::ReproMode;

/// Which prefix aggregates a [`SummaryStatistics`] carries.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatisticsKind {
    /// Prefix sums only; enough for mean-driven costs.
    Linear,
    /// Prefix sums and prefix sums of squares; required by variance-driven costs.
    Squared,
}

/// Returns `n + 1` prefix sums with a leading zero.
pub fn prefix_sums(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len() + 1);
    out.push(0.0);
    let mut total = 0.0;
    for &value in values {
        total += value;
        out.push(total);
    }
    out
}

/// Kahan-compensated variant of [`prefix_sums`].
pub fn prefix_sums_kahan(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len() + 1);
    out.push(0.0);
    let mut total = 0.0;
    let mut compensation = 0.0;
    for &value in values {
        let y = value - compensation;
        let t = total + y;
        compensation = (t - total) - y;
        total = t;
        out.push(total);
    }
    out
}

fn accumulate(values: impl Iterator<Item = f64>, repro_mode: ReproMode) -> Vec<f64> {
    let series: Vec<f64> = values.collect();
    if repro_mode.uses_compensated_summation() {
        prefix_sums_kahan(&series)
    } else {
        prefix_sums(&series)
    }
}

/// Prefix aggregates over a univariate series for O(1) range queries.
///
/// All ranges are inclusive and 0-indexed: `[start, end]`. A range with
/// `start > end` is empty and every sum over it is `+inf`, so cost models built
/// on top reject it without a separate check. An `end` past the series is an
/// [`BinSegError::Index`].
#[derive(Clone, Debug, PartialEq)]
pub struct SummaryStatistics {
    kind: StatisticsKind,
    prefix_sum: Vec<f64>,
    prefix_sum_sq: Option<Vec<f64>>,
    total_mean: f64,
}

impl SummaryStatistics {
    /// Builds the prefix aggregates in one pass over `values`.
    pub fn new(values: &[f64], kind: StatisticsKind, repro_mode: ReproMode) -> Self {
        let prefix_sum = accumulate(values.iter().copied(), repro_mode);
        let prefix_sum_sq = match kind {
            StatisticsKind::Linear => None,
            StatisticsKind::Squared => Some(accumulate(
                values.iter().map(|value| value * value),
                repro_mode,
            )),
        };
        let total_mean = if values.is_empty() {
            f64::NAN
        } else {
            prefix_sum[values.len()] / values.len() as f64
        };

        Self {
            kind,
            prefix_sum,
            prefix_sum_sq,
            total_mean,
        }
    }

    pub fn linear(values: &[f64]) -> Self {
        Self::new(values, StatisticsKind::Linear, ReproMode::default())
    }

    pub fn squared(values: &[f64]) -> Self {
        Self::new(values, StatisticsKind::Squared, ReproMode::default())
    }

    pub fn kind(&self) -> StatisticsKind {
        self.kind
    }

    /// Number of observations in the underlying series.
    pub fn len(&self) -> usize {
        self.prefix_sum.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_end(&self, start: usize, end: usize) -> Result<()> {
        if end >= self.len() {
            return Err(BinSegError::index(start, end, self.len()));
        }
        Ok(())
    }

    fn range_from(&self, prefix: &[f64], start: usize, end: usize) -> Result<f64> {
        self.check_end(start, end)?;
        if start > end {
            return Ok(f64::INFINITY);
        }
        Ok(prefix[end + 1] - prefix[start])
    }

    /// Sum of `values[start..=end]`.
    pub fn range_sum(&self, start: usize, end: usize) -> Result<f64> {
        self.range_from(&self.prefix_sum, start, end)
    }

    /// Sum of squares of `values[start..=end]`; only on [`StatisticsKind::Squared`].
    pub fn range_sum_of_squares(&self, start: usize, end: usize) -> Result<f64> {
        let Some(prefix_sum_sq) = self.prefix_sum_sq.as_deref() else {
            return Err(BinSegError::unsupported(
                "range_sum_of_squares requires squared summary statistics; these are linear",
            ));
        };
        self.range_from(prefix_sum_sq, start, end)
    }

    pub fn mean(&self, start: usize, end: usize) -> Result<f64> {
        let sum = self.range_sum(start, end)?;
        if start > end {
            return Ok(f64::INFINITY);
        }
        Ok(sum / segment_len(start, end) as f64)
    }

    /// Mean of the whole series; `NaN` for an empty series.
    pub fn total_mean(&self) -> f64 {
        self.total_mean
    }

    /// Returns `N * variance` of `values[start..=end]`.
    ///
    /// With `use_fixed_mean` the deviations are taken around [`Self::total_mean`]
    /// instead of the segment's own mean.
    pub fn variance_n(&self, start: usize, end: usize, use_fixed_mean: bool) -> Result<f64> {
        let sum = self.range_sum(start, end)?;
        let sum_sq = self.range_sum_of_squares(start, end)?;
        if start > end {
            return Ok(f64::INFINITY);
        }

        let n = segment_len(start, end) as f64;
        if use_fixed_mean {
            let mu = self.total_mean;
            Ok(sum_sq - 2.0 * mu * sum + n * mu * mu)
        } else {
            Ok(sum_sq - sum * sum / n)
        }
    }
}

/// Length of the inclusive range `[start, end]`; zero when `start > end`.
pub fn segment_len(start: usize, end: usize) -> usize {
    if start > end { 0 } else { end - start + 1 }
}
