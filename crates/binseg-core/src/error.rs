// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors surfaced by statistics queries, cost models and segmentation runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BinSegError {
    /// Invalid numeric parameters or request payload; never recovered.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Unknown algorithm or distribution name.
    #[error("{kind} not found: '{name}'")]
    NotFound { kind: &'static str, name: String },

    /// Out-of-range statistics query. Indicates broken engine bookkeeping.
    #[error("index error: range [{start}, {end}] outside series of length {len}")]
    Index {
        start: usize,
        end: usize,
        len: usize,
    },

    /// Operation not offered by this statistics or model variant.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Input data outside a distribution's support.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Non-finite value where a finite one is required.
    #[error("numerical issue: {0}")]
    NumericalIssue(String),
}

impl BinSegError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn index(start: usize, end: usize, len: usize) -> Self {
        Self::Index { start, end, len }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::UnsupportedOperation(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn numerical_issue(msg: impl Into<String>) -> Self {
        Self::NumericalIssue(msg.into())
    }
}

/// Result alias used across the binseg crates.
pub type Result<T> = std::result::Result<T, BinSegError>;
