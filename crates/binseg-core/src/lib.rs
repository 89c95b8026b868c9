// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Shared types for binseg: the error taxonomy, prefix summary statistics,
//! the name-keyed registry, result tables and run diagnostics.

pub mod diagnostics;
pub mod error;
pub mod execution_context;
pub mod observability;
pub mod params;
pub mod registry;
pub mod repro;
pub mod results;
pub mod summary;

pub use diagnostics::{DIAGNOSTICS_SCHEMA_VERSION, Diagnostics, SearchStats};
pub use error::{BinSegError, Result};
pub use execution_context::ExecutionContext;
pub use observability::{ProgressSink, TelemetrySink};
pub use params::SegmentationParams;
pub use registry::{Constructor, Registry};
pub use repro::ReproMode;
pub use results::{FittedParams, ResultTable, StepRecord};
pub use summary::{
    StatisticsKind, SummaryStatistics, prefix_sums, prefix_sums_kahan, segment_len,
};
