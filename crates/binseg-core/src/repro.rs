// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Reproducibility mode controlling how prefix statistics are accumulated.
///
/// `Strict` uses compensated (Kahan) summation so long series produce the same
/// prefix sums regardless of magnitude drift. `Balanced` uses plain
/// accumulation. `Fast` is accepted on the wire and in execution contexts but
/// currently accumulates exactly like `Balanced`; no cheaper path exists for
/// prefix sums.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReproMode {
    Strict,
    #[default]
    Balanced,
    Fast,
}

impl ReproMode {
    pub fn uses_compensated_summation(self) -> bool {
        matches!(self, Self::Strict)
    }
}
