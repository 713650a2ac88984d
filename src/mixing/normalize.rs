// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Clipping guard applied to mixed signals

/// Largest absolute sample value, 0 for an empty signal
pub fn peak(signal: &[f64]) -> f64 {
    signal.iter().fold(0.0, |acc: f64, &x| acc.max(x.abs()))
}

/// Rescale `signal` so that no sample exceeds `max_abs_value` in magnitude.
///
/// When the peak is already within bounds the signal is returned unchanged,
/// otherwise every sample is multiplied by `max_abs_value / peak`. The
/// result is clamped to the bound so rounding cannot push the peak over it.
///
/// # Arguments
///
/// * `signal` - Mixed samples, consumed and returned
/// * `max_abs_value` - Largest magnitude allowed in the output
///
/// # Returns
///
/// The signal, unchanged or scaled down so that its peak is `max_abs_value`
///
/// # Example
///
/// ```
/// use rust_research_tools::mixing::clip_guard;
///
/// let out = clip_guard(vec![65536.0, -16384.0], 32768.0);
/// assert_eq!(out, vec![32768.0, -8192.0]);
/// ```
pub fn clip_guard(mut signal: Vec<f64>, max_abs_value: f64) -> Vec<f64> {
    let peak = peak(&signal);
    if peak > max_abs_value {
        let reduction = max_abs_value / peak;
        log::debug!(
            "Peak {:.1} exceeds {:.1}, rescaling by {:.6}",
            peak,
            max_abs_value,
            reduction
        );
        for sample in signal.iter_mut() {
            *sample = (*sample * reduction).clamp(-max_abs_value, max_abs_value);
        }
    }
    signal
}
