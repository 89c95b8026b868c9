// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Deterministic inputs shared by the benchmarks.

fn lcg_next(state: &mut u64) -> u64 {
    *state = state
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    *state
}

/// `count` random inclusive ranges `[start, end]` inside `[0, n)`.
pub fn generate_queries(n: usize, count: usize) -> Vec<(usize, usize)> {
    let mut queries = Vec::with_capacity(count);
    let mut state = 0xfeed_f00d_dead_beef_u64;

    for _ in 0..count {
        let a = (lcg_next(&mut state) as usize) % n;
        let b = (lcg_next(&mut state) as usize) % n;
        queries.push((a.min(b), a.max(b)));
    }

    queries
}

/// Smooth oscillating signal with a level shift every `n / segments` points.
pub fn piecewise_signal(n: usize, segments: usize) -> Vec<f64> {
    let width = (n / segments.max(1)).max(1);
    (0..n)
        .map(|idx| {
            let x = idx as f64;
            let level = ((idx / width) % 4) as f64 * 3.0;
            level + x.sin() * 0.5 + x.cos() * 0.1
        })
        .collect()
}

/// Non-negative integer counts whose rate changes every `n / segments` points.
pub fn piecewise_counts(n: usize, segments: usize) -> Vec<f64> {
    let width = (n / segments.max(1)).max(1);
    let mut state = 0x5eed_u64;
    (0..n)
        .map(|idx| {
            let rate = 2 + ((idx / width) % 3) * 4;
            (lcg_next(&mut state) % (2 * rate as u64 + 1)) as f64
        })
        .collect()
}
