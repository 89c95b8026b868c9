// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::candidate::{CandidateQueue, CandidateSegment, SegmentOrigin};
use crate::catalog::SegmentationAlgorithm;
use binseg_core::{
    Diagnostics, ExecutionContext, FittedParams, Result, ResultTable, SearchStats,
    SegmentationParams, StepRecord, SummaryStatistics,
};
use binseg_costs::CostModel;
use std::borrow::Cow;
use std::time::Instant;
use tracing::debug;

/// Leading result-table columns emitted by [`BinSeg`].
pub const BINSEG_FIELD_NAMES: [&str; 5] = [
    "step",
    "split_index",
    "invalidates_index",
    "invalidates_after",
    "cost",
];

/// Registry name of [`BinSeg`].
pub const BINSEG_NAME: &str = "BS";

/// Regular greedy binary segmentation.
///
/// Each step splits the segment whose best split lowers the total cost the
/// most, then scores both children. The search stops after
/// `num_changepoints` splits, or earlier once no remaining segment has a
/// non-negative cost decrease. All search state lives inside one call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BinSeg;

impl BinSeg {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
struct SearchOutcome {
    initial_cost: f64,
    initial_params: FittedParams,
    rows: Vec<StepRecord>,
    queue: CandidateQueue,
    stats: SearchStats,
    stop_reason: Option<&'static str>,
}

fn account(stats: &mut SearchStats, candidate: &CandidateSegment) {
    stats.cost_evals += candidate.cost_evals;
    stats.candidates_considered += candidate.positions_scanned;
    stats.segments_created += 1;
}

/// Whether `segments`, sorted by start, tile `[0, n - 1]` without gaps or overlap.
fn tiles_series(segments: &[(usize, usize)], n: usize) -> bool {
    let mut next = 0;
    for &(start, end) in segments {
        if start != next || end < start {
            return false;
        }
        next = end + 1;
    }
    next == n
}

fn greedy_search(
    model: &dyn CostModel,
    summary: &SummaryStatistics,
    params: &SegmentationParams,
    ctx: &ExecutionContext<'_>,
) -> Result<SearchOutcome> {
    let n = summary.len();
    let min_segment_len = params.min_segment_len;
    let mut stats = SearchStats::default();

    let root = CandidateSegment::new(
        model,
        summary,
        0,
        n - 1,
        min_segment_len,
        SegmentOrigin::ROOT,
    )?;
    account(&mut stats, &root);
    let initial_cost = root.cost_no_split;
    let initial_params = model.segment_params(summary, 0, n - 1)?;

    let mut queue = CandidateQueue::new();
    queue.push(root);

    let mut rows = Vec::with_capacity(params.num_changepoints);
    let mut cumulative_cost = initial_cost;
    let mut stop_reason = None;

    for step in 1..=params.num_changepoints {
        let Some(best) = queue.peek() else {
            stop_reason = Some("candidate queue is empty");
            break;
        };
        let Some(mid) = best.best_split else {
            stop_reason = Some("no splittable segment remains");
            break;
        };
        if best.best_decrease < 0.0 {
            stop_reason = Some("best remaining split would increase the cost");
            break;
        }

        let Some(best) = queue.pop() else {
            break;
        };
        cumulative_cost -= best.best_decrease;
        let fitted = model.derive_params(summary, best.start, mid, best.end)?;
        debug!(
            step,
            split = mid,
            start = best.start,
            end = best.end,
            decrease = best.best_decrease,
            cost = cumulative_cost,
            "accepted split"
        );

        rows.push(StepRecord {
            step,
            split_index: mid,
            invalidates_index: best.origin.step,
            invalidates_after: best.origin.right_child,
            cost_decrease: best.best_decrease,
            cumulative_cost,
            params: fitted,
        });

        let left = CandidateSegment::new(
            model,
            summary,
            best.start,
            mid,
            min_segment_len,
            SegmentOrigin::left_of(step),
        )?;
        let right = CandidateSegment::new(
            model,
            summary,
            mid + 1,
            best.end,
            min_segment_len,
            SegmentOrigin::right_of(step),
        )?;
        account(&mut stats, &left);
        account(&mut stats, &right);
        queue.push(left);
        queue.push(right);
        debug_assert!(tiles_series(&queue.segments(), n));

        ctx.report_progress(step as f32 / params.num_changepoints as f32);
    }

    Ok(SearchOutcome {
        initial_cost,
        initial_params,
        rows,
        queue,
        stats,
        stop_reason,
    })
}

impl SegmentationAlgorithm for BinSeg {
    fn name(&self) -> &'static str {
        BINSEG_NAME
    }

    fn description(&self) -> &'static str {
        "Regular Binary Segmentation"
    }

    fn field_names(&self) -> &'static [&'static str] {
        &BINSEG_FIELD_NAMES
    }

    fn segment(
        &self,
        values: &[f64],
        model: &dyn CostModel,
        params: &SegmentationParams,
        ctx: &ExecutionContext<'_>,
    ) -> Result<ResultTable> {
        params.validate(values.len())?;
        let summary = model.precompute(values, ctx.repro_mode)?;

        let started_at = Instant::now();
        let outcome = greedy_search(model, &summary, params, ctx)?;
        let runtime_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);

        let mut notes = vec![format!(
            "num_changepoints={}, min_segment_len={}",
            params.num_changepoints, params.min_segment_len
        )];
        let mut warnings = vec![];

        if !outcome.initial_cost.is_finite() {
            warnings.push(format!(
                "full-series cost under {} is not finite; no split can be scored",
                model.name()
            ));
        }
        if let Some(reason) = outcome.stop_reason {
            debug!(
                accepted = outcome.rows.len(),
                requested = params.num_changepoints,
                reason,
                "stopped early"
            );
            notes.push(format!(
                "stopped early after {} of {} splits: {reason}",
                outcome.rows.len(),
                params.num_changepoints
            ));
        }

        ctx.record_scalar("offline.binseg.cost_evals", outcome.stats.cost_evals as f64);
        ctx.record_scalar(
            "offline.binseg.candidates_considered",
            outcome.stats.candidates_considered as f64,
        );
        ctx.record_scalar("offline.binseg.runtime_ms", runtime_ms as f64);
        // The last accepted step already reported completion.
        if params.num_changepoints == 0 || outcome.rows.len() < params.num_changepoints {
            ctx.report_progress(1.0);
        }

        notes.push(format!(
            "final_change_count={}, open_segments={}, cost_evals={}, candidates_considered={}, segments_created={}",
            outcome.rows.len(),
            outcome.queue.len(),
            outcome.stats.cost_evals,
            outcome.stats.candidates_considered,
            outcome.stats.segments_created
        ));
        debug!(
            algorithm = BINSEG_NAME,
            cost_model = model.name(),
            n = values.len(),
            change_points = outcome.rows.len(),
            runtime_ms,
            "segmentation finished"
        );

        let diagnostics = Diagnostics {
            n: values.len(),
            notes,
            warnings,
            algorithm: Cow::Borrowed(BINSEG_NAME),
            cost_model: Cow::Borrowed(model.name()),
            repro_mode: ctx.repro_mode,
            search_stats: Some(outcome.stats),
            ..Diagnostics::default()
        };

        let mut table = ResultTable::new(
            values.len(),
            &BINSEG_FIELD_NAMES,
            model.parameter_names(),
            outcome.initial_cost,
            outcome.initial_params,
            diagnostics,
        );
        for row in outcome.rows {
            table.push(row)?;
        }
        Ok(table)
    }
}
