// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Linearly spaced SNR values

use super::MixError;
use serde::{Deserialize, Serialize};

/// `n` evenly spaced values from `start` to `end` inclusive.
///
/// A single point yields `[end]`, not the midpoint. `n == 0` is rejected.
pub fn linspace(start: f64, end: f64, n: usize) -> Result<Vec<f64>, MixError> {
    match n {
        0 => Err(MixError::InvalidSweep(n)),
        1 => Ok(vec![end]),
        _ => {
            let step = (end - start) / (n - 1) as f64;
            Ok((0..n).map(|i| start + step * i as f64).collect())
        }
    }
}

/// SNR sweep request: `count` values in dB from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnrSweep {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl SnrSweep {
    pub fn new(start: f64, end: f64, count: usize) -> Self {
        Self { start, end, count }
    }

    /// A sweep containing exactly one SNR value
    pub fn single(snr_db: f64) -> Self {
        Self::new(snr_db, snr_db, 1)
    }

    /// Expand the sweep into its SNR values
    pub fn values(&self) -> Result<Vec<f64>, MixError> {
        linspace(self.start, self.end, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_is_end_value() {
        assert_eq!(linspace(-40.0, 40.0, 1).unwrap(), vec![40.0]);
        assert_eq!(linspace(3.0, 7.0, 1).unwrap(), vec![7.0]);
    }

    #[test]
    fn integer_steps() {
        let values = linspace(0.0, 10.0, 11).unwrap();
        assert_eq!(values.len(), 11);
        for (k, v) in values.iter().enumerate() {
            assert_eq!(*v, k as f64);
        }
    }

    #[test]
    fn default_sweep_spans_range() {
        let values = SnrSweep::new(-40.0, 40.0, 19).values().unwrap();
        assert_eq!(values.len(), 19);
        assert_eq!(values[0], -40.0);
        assert!((values[18] - 40.0).abs() < 1e-9);
        assert!((values[1] - values[0] - 80.0 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn descending_sweep() {
        assert_eq!(linspace(10.0, 0.0, 3).unwrap(), vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn zero_points_is_rejected() {
        assert_eq!(linspace(0.0, 1.0, 0), Err(MixError::InvalidSweep(0)));
        assert!(SnrSweep::new(0.0, 1.0, 0).values().is_err());
    }
}
