// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use super::output_len;

/// Direct linear convolution, `c[i] = sum_j a[i - j] * b[j]`
pub fn direct(a: &[f64], b: &[f64]) -> Vec<f64> {
    let len = output_len(a.len(), b.len());
    let mut out = vec![0.0; len];

    for (i, slot) in out.iter_mut().enumerate() {
        // j ranges over indices where both a[i - j] and b[j] exist
        let j_min = i.saturating_sub(a.len() - 1);
        let j_max = i.min(b.len() - 1);
        *slot = (j_min..=j_max).map(|j| a[i - j] * b[j]).sum();
    }

    out
}
