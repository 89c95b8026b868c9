// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use binseg_core::{BinSegError, Result};

const INTEGER_TOL: f64 = 1e-9;

fn require_non_empty(model: &str, values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(BinSegError::invalid_input(format!(
            "{model} requires n >= 1; got n=0"
        )));
    }
    Ok(())
}

/// Rejects empty input and any `NaN` or infinite value.
pub fn validate_finite(model: &str, values: &[f64]) -> Result<()> {
    require_non_empty(model, values)?;
    for (t, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(BinSegError::invalid_input(format!(
                "{model} requires finite values; got value={value} at t={t}"
            )));
        }
    }
    Ok(())
}

/// Finite values that are also `>= 0`.
pub fn validate_non_negative(model: &str, values: &[f64]) -> Result<()> {
    validate_finite(model, values)?;
    for (t, &value) in values.iter().enumerate() {
        if value < 0.0 {
            return Err(BinSegError::invalid_input(format!(
                "{model} requires non-negative values; got value={value} at t={t}"
            )));
        }
    }
    Ok(())
}

/// Non-negative integer-valued counts, within a small rounding tolerance.
pub fn validate_counts(model: &str, values: &[f64]) -> Result<()> {
    validate_non_negative(model, values)?;
    for (t, &value) in values.iter().enumerate() {
        if (value.round() - value).abs() > INTEGER_TOL {
            return Err(BinSegError::invalid_input(format!(
                "{model} requires integer-valued counts; got value={value} at t={t}"
            )));
        }
    }
    Ok(())
}
