// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Receives progress fractions in `[0.0, 1.0]` while a run is in flight.
pub trait ProgressSink {
    fn on_progress(&self, fraction: f32);
}

/// Receives named scalar measurements (counters, timings) from a run.
pub trait TelemetrySink {
    fn record_scalar(&self, key: &'static str, value: f64);
}
