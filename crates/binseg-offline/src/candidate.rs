// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use binseg_core::{Result, SummaryStatistics};
use binseg_costs::CostModel;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

/// Which accepted split produced a segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SegmentOrigin {
    /// Step of the split that created the segment; 0 for the full series.
    pub step: usize,
    /// Whether the segment is the right-hand child of that split.
    pub right_child: bool,
}

impl SegmentOrigin {
    pub const ROOT: Self = Self {
        step: 0,
        right_child: false,
    };

    pub const fn left_of(step: usize) -> Self {
        Self {
            step,
            right_child: false,
        }
    }

    pub const fn right_of(step: usize) -> Self {
        Self {
            step,
            right_child: true,
        }
    }
}

/// An inclusive range `[start, end]` together with its best single split.
///
/// The split search runs eagerly on construction: every `mid` in
/// `[start + min_segment_len, end - min_segment_len]` is scored and the
/// lowest split cost wins, the first index on ties. A segment is unsplittable
/// when no index qualifies, when its own cost is not finite, or when any scanned
/// split cost is not finite; it then carries `best_split = None` and
/// `best_decrease = -inf`.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateSegment {
    pub start: usize,
    pub end: usize,
    pub cost_no_split: f64,
    pub best_split: Option<usize>,
    pub best_decrease: f64,
    pub origin: SegmentOrigin,
    /// Segment cost queries issued while scanning.
    pub cost_evals: usize,
    /// Split positions scanned.
    pub positions_scanned: usize,
}

impl CandidateSegment {
    pub fn new(
        model: &dyn CostModel,
        stats: &SummaryStatistics,
        start: usize,
        end: usize,
        min_segment_len: usize,
        origin: SegmentOrigin,
    ) -> Result<Self> {
        let cost_no_split = model.segment_cost(stats, start, end)?;
        let mut candidate = Self {
            start,
            end,
            cost_no_split,
            best_split: None,
            best_decrease: f64::NEG_INFINITY,
            origin,
            cost_evals: 1,
            positions_scanned: 0,
        };

        if !cost_no_split.is_finite() {
            trace!(start, end, "segment cost is not finite; unsplittable");
            return Ok(candidate);
        }

        let (Some(first), Some(last)) = (
            start.checked_add(min_segment_len),
            end.checked_sub(min_segment_len),
        ) else {
            return Ok(candidate);
        };

        let mut best: Option<(usize, f64)> = None;
        for mid in first..=last {
            let split_cost = model.split_cost(stats, start, mid, end)?;
            candidate.cost_evals += 2;
            candidate.positions_scanned += 1;
            if !split_cost.is_finite() {
                trace!(start, end, mid, "non-finite split cost; unsplittable");
                best = None;
                break;
            }
            if best.is_none_or(|(_, best_cost)| split_cost < best_cost) {
                best = Some((mid, split_cost));
            }
        }

        if let Some((mid, split_cost)) = best {
            candidate.best_split = Some(mid);
            candidate.best_decrease = cost_no_split - split_cost;
        }
        trace!(
            start,
            end,
            best_split = ?candidate.best_split,
            best_decrease = candidate.best_decrease,
            "candidate segment"
        );
        Ok(candidate)
    }

    /// Number of points in the segment.
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_splittable(&self) -> bool {
        self.best_split.is_some()
    }
}

#[derive(Debug)]
struct QueueEntry {
    seq: u64,
    candidate: CandidateSegment,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    // Larger decrease first; earlier insertion first among equals.
    fn cmp(&self, other: &Self) -> Ordering {
        self.candidate
            .best_decrease
            .total_cmp(&other.candidate.best_decrease)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Max-priority queue of candidate segments keyed by best decrease.
#[derive(Debug, Default)]
pub struct CandidateQueue {
    heap: BinaryHeap<QueueEntry>,
    next_seq: u64,
}

impl CandidateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, candidate: CandidateSegment) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueueEntry { seq, candidate });
    }

    pub fn peek(&self) -> Option<&CandidateSegment> {
        self.heap.peek().map(|entry| &entry.candidate)
    }

    pub fn pop(&mut self) -> Option<CandidateSegment> {
        self.heap.pop().map(|entry| entry.candidate)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Ranges currently held, ordered by start.
    pub fn segments(&self) -> Vec<(usize, usize)> {
        let mut ranges: Vec<(usize, usize)> = self
            .heap
            .iter()
            .map(|entry| (entry.candidate.start, entry.candidate.end))
            .collect();
        ranges.sort_unstable();
        ranges
    }
}
