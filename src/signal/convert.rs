// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Integer PCM <-> floating point amplitude conversion

/// Widen integer samples to floating point amplitudes. Exact.
pub fn to_float(samples: &[i32]) -> Vec<f64> {
    samples.iter().map(|&s| f64::from(s)).collect()
}

/// Narrow amplitudes back to integer samples.
///
/// Each value is truncated toward zero, not rounded: `2.9 -> 2` and
/// `-2.9 -> -2`. Values outside the `i32` range saturate and NaN maps to 0.
pub fn to_int(samples: &[f64]) -> Vec<i32> {
    samples.iter().map(|&s| s as i32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_toward_zero() {
        let ints = to_int(&[2.9, -2.9, 0.5, -0.5, 32767.99, -32768.0]);
        assert_eq!(ints, vec![2, -2, 0, 0, 32767, -32768]);
    }

    #[test]
    fn integer_round_trip_is_identity() {
        let samples: Vec<i32> = (-300..300).map(|v| v * 109).collect();
        assert_eq!(to_int(&to_float(&samples)), samples);
        assert_eq!(
            to_int(&to_float(&[i32::MIN, i32::MAX])),
            vec![i32::MIN, i32::MAX]
        );
    }

    #[test]
    fn empty_input() {
        assert!(to_float(&[]).is_empty());
        assert!(to_int(&[]).is_empty());
    }
}
