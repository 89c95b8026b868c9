// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Greedy binary segmentation over pluggable distribution costs.
//!
//! ```
//! let mut values = vec![0.0; 5];
//! values.extend([10.0; 5]);
//!
//! let table = binseg_offline::segment(&values, "BS", "mean_norm", 1, 1)?;
//! assert_eq!(table.change_points(), vec![4]);
//! # Ok::<(), binseg_core::BinSegError>(())
//! ```

pub mod binseg;
pub mod candidate;
pub mod catalog;
#[cfg(feature = "serde")]
pub mod request;

pub use binseg::{BINSEG_FIELD_NAMES, BINSEG_NAME, BinSeg};
pub use candidate::{CandidateQueue, CandidateSegment, SegmentOrigin};
pub use catalog::{
    ALGORITHM_KIND, AlgorithmRegistry, Catalog, SegmentationAlgorithm, list_algorithms,
    list_distributions, register_builtin_algorithms, segment,
};
#[cfg(feature = "serde")]
pub use request::{REQUEST_SCHEMA_VERSION, SegmentationRequest, UnknownFields};
