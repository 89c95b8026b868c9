// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::error::{BinSegError, Result};

/// Numeric knobs of one segmentation call.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SegmentationParams {
    /// Maximum number of changepoints to emit.
    pub num_changepoints: usize,
    /// Minimum number of points on each side of a candidate split.
    pub min_segment_len: usize,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            num_changepoints: 1,
            min_segment_len: 1,
        }
    }
}

impl SegmentationParams {
    pub fn new(num_changepoints: usize, min_segment_len: usize) -> Self {
        Self {
            num_changepoints,
            min_segment_len,
        }
    }

    /// Checks the parameters against a series of length `n`.
    ///
    /// A series that is valid but too short to split (`2 * min_segment_len > n`)
    /// passes; the search then simply finds no split.
    pub fn validate(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(BinSegError::configuration(
                "series length must be >= 1; got 0",
            ));
        }
        if self.min_segment_len == 0 {
            return Err(BinSegError::configuration(
                "min_segment_len must be >= 1; got 0",
            ));
        }
        if self.min_segment_len > n {
            return Err(BinSegError::configuration(format!(
                "min_segment_len must be <= series length; got min_segment_len={}, n={n}",
                self.min_segment_len
            )));
        }
        if self.num_changepoints >= n {
            return Err(BinSegError::configuration(format!(
                "num_changepoints must be < series length; got num_changepoints={}, n={n}",
                self.num_changepoints
            )));
        }
        Ok(())
    }
}
