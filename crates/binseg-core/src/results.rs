// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::diagnostics::Diagnostics;
use crate::error::{BinSegError, Result};
use std::borrow::Cow;

/// Ordered `(name, value)` pairs produced by a cost model's parameter fit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FittedParams {
    entries: Vec<(Cow<'static, str>, f64)>,
}

impl FittedParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: impl Into<Cow<'static, str>>, value: f64) {
        self.entries.push((name.into(), value));
    }

    /// Value of the first entry named `name`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| *value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, value)| *value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_ref(), *value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<Cow<'static, str>>> FromIterator<(N, f64)> for FittedParams {
    fn from_iter<I: IntoIterator<Item = (N, f64)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

/// One accepted split of a segmentation run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct StepRecord {
    /// 1-based step number.
    pub step: usize,
    /// Last index of the left child; the split is `[.., split_index] | [split_index + 1, ..]`.
    pub split_index: usize,
    /// Step whose split produced the segment split here; 0 is the unsplit series.
    pub invalidates_index: usize,
    /// Whether that segment was the right-hand child of its parent split.
    pub invalidates_after: bool,
    pub cost_decrease: f64,
    /// Total cost of the segmentation after this step.
    pub cumulative_cost: f64,
    /// Fitted parameters of the two new segments.
    pub params: FittedParams,
}

impl StepRecord {
    /// Row values in [`ResultTable::column_names`] order.
    pub fn values(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(5 + self.params.len());
        out.push(self.step as f64);
        out.push(self.split_index as f64);
        out.push(self.invalidates_index as f64);
        out.push(if self.invalidates_after { 1.0 } else { 0.0 });
        out.push(self.cumulative_cost);
        out.extend(self.params.values());
        out
    }
}

/// Append-only table of split records emitted by a segmentation run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ResultTable {
    pub n: usize,
    columns: Vec<Cow<'static, str>>,
    /// Cost of the full series as a single segment.
    pub initial_cost: f64,
    /// Fitted parameters of the full series as a single segment.
    pub initial_params: FittedParams,
    rows: Vec<StepRecord>,
    pub diagnostics: Diagnostics,
}

impl ResultTable {
    /// Creates an empty table whose columns are `algorithm_fields` followed by
    /// `parameter_names`.
    pub fn new(
        n: usize,
        algorithm_fields: &[&'static str],
        parameter_names: &[&'static str],
        initial_cost: f64,
        initial_params: FittedParams,
        diagnostics: Diagnostics,
    ) -> Self {
        let columns = algorithm_fields
            .iter()
            .chain(parameter_names)
            .map(|name| Cow::Borrowed(*name))
            .collect();

        Self {
            n,
            columns,
            initial_cost,
            initial_params,
            rows: vec![],
            diagnostics,
        }
    }

    /// Appends a record; steps must be consecutive and splits interior.
    pub fn push(&mut self, record: StepRecord) -> Result<()> {
        let expected_step = self.rows.len() + 1;
        if record.step != expected_step {
            return Err(BinSegError::numerical_issue(format!(
                "result rows must be consecutive: expected step {expected_step}, got {}",
                record.step
            )));
        }
        if record.split_index + 1 >= self.n {
            return Err(BinSegError::index(
                record.split_index,
                record.split_index + 1,
                self.n,
            ));
        }
        if !record.cumulative_cost.is_finite() {
            return Err(BinSegError::numerical_issue(format!(
                "non-finite cumulative cost at step {}: {}",
                record.step, record.cumulative_cost
            )));
        }
        self.rows.push(record);
        Ok(())
    }

    pub fn rows(&self) -> &[StepRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|name| name.as_ref())
    }

    /// Split indices in ascending order.
    pub fn change_points(&self) -> Vec<usize> {
        let mut points: Vec<usize> = self.rows.iter().map(|row| row.split_index).collect();
        points.sort_unstable();
        points
    }

    /// Cumulative cost after the last step, or the unsplit cost when empty.
    pub fn final_cost(&self) -> f64 {
        self.rows
            .last()
            .map_or(self.initial_cost, |row| row.cumulative_cost)
    }

    /// Row-major numeric matrix, one row per step.
    pub fn to_matrix(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(StepRecord::values).collect()
    }
}
