// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! RMS power and SNR amplitude scaling

use super::MixError;

/// Root-mean-square amplitude, `sqrt(mean(x^2))`.
///
/// The signal must be non-empty: an empty slice yields NaN. Callers that
/// accept arbitrary input check emptiness first (see `NoiseMixer`).
pub fn rms(signal: &[f64]) -> f64 {
    let sum: f64 = signal.iter().map(|&x| x * x).sum();
    (sum / signal.len() as f64).sqrt()
}

/// Noise RMS needed to reach `snr_db` against a clean signal of RMS `clean_rms`.
///
/// `clean_rms / 10^(snr_db / 20)`: a higher SNR gives a quieter noise.
pub fn target_rms(clean_rms: f64, snr_db: f64) -> f64 {
    clean_rms / 10f64.powf(snr_db / 20.0)
}

/// Mean squared error between `a` and `b`.
///
/// With `b = None` the error is measured against silence, i.e. the mean power
/// of `a`. Fails on an empty `a` or when the lengths differ.
pub fn mse(a: &[f64], b: Option<&[f64]>) -> Result<f64, MixError> {
    if a.is_empty() {
        return Err(MixError::EmptySignal("input"));
    }
    let sum: f64 = match b {
        None => a.iter().map(|&x| x * x).sum(),
        Some(b) => {
            if a.len() != b.len() {
                return Err(MixError::LengthMismatch {
                    left: a.len(),
                    right: b.len(),
                });
            }
            a.iter().zip(b).map(|(&x, &y)| (x - y) * (x - y)).sum()
        }
    };
    Ok(sum / a.len() as f64)
}
