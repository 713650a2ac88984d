// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! FFT based linear convolution

use super::output_len;
use rustfft::{num_complex::Complex64, FftPlanner};

/// Zero-pad a real signal to `len` complex samples
fn padded(signal: &[f64], len: usize) -> Vec<Complex64> {
    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    buffer.resize(len, Complex64::new(0.0, 0.0));
    buffer
}

/// Linear convolution in the complex domain.
///
/// Both inputs are zero-padded to `M = a.len() + b.len() - 1`, transformed,
/// multiplied bin by bin and transformed back. The result is scaled by
/// `1 / M`; its imaginary parts hold the numerical residue of the transform
/// and are left as computed.
pub fn via_fft_complex(a: &[f64], b: &[f64]) -> Vec<Complex64> {
    let len = output_len(a.len(), b.len());
    if len == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(len);
    let inverse = planner.plan_fft_inverse(len);

    let mut spectrum_a = padded(a, len);
    let mut spectrum_b = padded(b, len);
    forward.process(&mut spectrum_a);
    forward.process(&mut spectrum_b);

    for (x, y) in spectrum_a.iter_mut().zip(&spectrum_b) {
        *x *= *y;
    }

    // rustfft leaves the inverse transform unnormalized
    inverse.process(&mut spectrum_a);
    let norm = 1.0 / len as f64;
    for value in spectrum_a.iter_mut() {
        *value *= norm;
    }

    spectrum_a
}

/// Linear convolution through the FFT, real part of `via_fft_complex`
pub fn via_fft(a: &[f64], b: &[f64]) -> Vec<f64> {
    via_fft_complex(a, b).iter().map(|c| c.re).collect()
}
