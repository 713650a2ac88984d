// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Normalized least mean squares filter
//!
//! For every desired sample `d` the weights are updated up to
//! `update_count` times with
//!
//! ```text
//! e = d - w.x
//! w = w + alpha * e * x / (|x|^2 + 1e-8)
//! ```
//!
//! stopping early once `|e| < threshold`. The filter output for the sample
//! is `w.x` after the last update.

use super::AdaptiveError;
use log::debug;
use rand::Rng;

/// Keeps the update finite for an all-zero regressor
const REGULARIZATION: f64 = 1e-8;

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// `len` uniform draws from `[0, 1)`, mean removed and doubled
pub fn centered_uniform<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    let draws: Vec<f64> = (0..len).map(|_| rng.random_range(0.0..1.0)).collect();
    let mean = draws.iter().sum::<f64>() / len.max(1) as f64;
    draws.into_iter().map(|v| (v - mean) * 2.0).collect()
}

/// Result columns of a filter run, one entry per desired sample
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NlmsOutput {
    /// Desired signal
    pub desired: Vec<f64>,
    /// Filter output after adaptation
    pub output: Vec<f64>,
    /// `desired - output`
    pub error: Vec<f64>,
    /// Running mean of the squared error
    pub mse: Vec<f64>,
    squared_error_sum: f64,
}

impl NlmsOutput {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            desired: Vec::with_capacity(capacity),
            output: Vec::with_capacity(capacity),
            error: Vec::with_capacity(capacity),
            mse: Vec::with_capacity(capacity),
            squared_error_sum: 0.0,
        }
    }

    fn push(&mut self, desired: f64, output: f64) {
        let error = desired - output;
        self.squared_error_sum += error * error;
        self.desired.push(desired);
        self.output.push(output);
        self.error.push(error);
        self.mse.push(self.squared_error_sum / self.error.len() as f64);
    }

    pub fn len(&self) -> usize {
        self.desired.len()
    }

    pub fn is_empty(&self) -> bool {
        self.desired.is_empty()
    }

    /// Mean squared error over the whole run
    pub fn final_mse(&self) -> Option<f64> {
        self.mse.last().copied()
    }
}

/// Normalized LMS adaptive FIR filter
#[derive(Debug, Clone, PartialEq)]
pub struct NlmsFilter {
    weights: Vec<f64>,
    alpha: f64,
    update_count: usize,
    threshold: f64,
}

impl NlmsFilter {
    /// Create a filter of `taps` zero weights.
    ///
    /// # Arguments
    ///
    /// * `taps` - Filter length
    /// * `alpha` - Step size, strictly between 0 and 2
    /// * `update_count` - Maximum number of weight updates per sample
    /// * `threshold` - Absolute error below which the updates stop
    ///
    /// # Returns
    ///
    /// The filter, or `AdaptiveError::StepSize` for an unstable step size
    ///
    /// # Example
    ///
    /// ```
    /// use rust_research_tools::adaptive::{AdaptiveError, NlmsFilter};
    ///
    /// assert!(NlmsFilter::new(16, 1.0, 2, 0.01).is_ok());
    /// assert_eq!(
    ///     NlmsFilter::new(16, 2.0, 2, 0.01),
    ///     Err(AdaptiveError::StepSize(2.0))
    /// );
    /// ```
    pub fn new(
        taps: usize,
        alpha: f64,
        update_count: usize,
        threshold: f64,
    ) -> Result<Self, AdaptiveError> {
        if !(alpha > 0.0 && alpha < 2.0) {
            return Err(AdaptiveError::StepSize(alpha));
        }
        if taps == 0 {
            return Err(AdaptiveError::NoTaps);
        }
        Ok(Self {
            weights: vec![0.0; taps],
            alpha,
            update_count,
            threshold,
        })
    }

    /// Start from the given weights instead of zeros
    pub fn with_weights(mut self, weights: Vec<f64>) -> Result<Self, AdaptiveError> {
        if weights.len() != self.weights.len() {
            return Err(AdaptiveError::TapCount {
                expected: self.weights.len(),
                actual: weights.len(),
            });
        }
        self.weights = weights;
        Ok(self)
    }

    /// Start from centered uniform random weights
    pub fn with_random_weights<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.weights = centered_uniform(self.weights.len(), rng);
        self
    }

    pub fn taps(&self) -> usize {
        self.weights.len()
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Adapt on one regressor and desired sample, returning the new output
    fn step(&mut self, x: &[f64], desired: f64) -> f64 {
        let energy = dot(x, x) + REGULARIZATION;
        for _ in 0..self.update_count {
            let error = desired - dot(&self.weights, x);
            let gain = self.alpha * error / energy;
            for (w, &xi) in self.weights.iter_mut().zip(x) {
                *w += gain * xi;
            }
            if error.abs() < self.threshold {
                break;
            }
        }
        dot(&self.weights, x)
    }

    /// Track `desired` from `reference` through a tapped delay line.
    ///
    /// The regressor at sample `n` is `[x[n], x[n-1], ..., x[n-taps+1]]`,
    /// with zeros before the start of the reference.
    pub fn adapt(
        &mut self,
        reference: &[f64],
        desired: &[f64],
    ) -> Result<NlmsOutput, AdaptiveError> {
        if desired.is_empty() {
            return Err(AdaptiveError::EmptySignal);
        }
        if reference.len() != desired.len() {
            return Err(AdaptiveError::LengthMismatch {
                reference: reference.len(),
                desired: desired.len(),
            });
        }

        let mut window = vec![0.0; self.taps()];
        let mut result = NlmsOutput::with_capacity(desired.len());
        for (&x, &d) in reference.iter().zip(desired) {
            window.rotate_right(1);
            window[0] = x;
            let y = self.step(&window, d);
            result.push(d, y);
        }

        debug!(
            "NLMS ran {} samples with {} taps, final MSE {:?}",
            result.len(),
            self.taps(),
            result.final_mse()
        );
        Ok(result)
    }

    /// Adapt every sample of `desired` against the same `regressor`
    pub fn adapt_fixed(
        &mut self,
        regressor: &[f64],
        desired: &[f64],
    ) -> Result<NlmsOutput, AdaptiveError> {
        if desired.is_empty() {
            return Err(AdaptiveError::EmptySignal);
        }
        if regressor.len() != self.taps() {
            return Err(AdaptiveError::TapCount {
                expected: self.taps(),
                actual: regressor.len(),
            });
        }

        let mut result = NlmsOutput::with_capacity(desired.len());
        for &d in desired {
            let y = self.step(regressor, d);
            result.push(d, y);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convolution::direct;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn step_size_outside_open_interval_is_rejected() {
        for alpha in [0.0, -0.5, 2.0, 3.0, f64::NAN] {
            assert!(matches!(
                NlmsFilter::new(4, alpha, 1, 0.0),
                Err(AdaptiveError::StepSize(_))
            ));
        }
        assert!(NlmsFilter::new(4, 1.999, 1, 0.0).is_ok());
    }

    #[test]
    fn zero_taps_is_rejected() {
        assert_eq!(NlmsFilter::new(0, 1.0, 1, 0.0), Err(AdaptiveError::NoTaps));
    }

    #[test]
    fn identifies_known_fir() -> Result<(), AdaptiveError> {
        let mut rng = StdRng::seed_from_u64(11);
        let system = [0.5, -0.3, 0.2, 0.1];
        let reference: Vec<f64> = (0..3000).map(|_| rng.random_range(-1.0..1.0)).collect();
        let desired = direct(&reference, &system)[..reference.len()].to_vec();

        let mut filter = NlmsFilter::new(4, 0.5, 1, 0.0)?;
        let result = filter.adapt(&reference, &desired)?;

        for (w, h) in filter.weights().iter().zip(&system) {
            assert!((w - h).abs() < 1e-6, "{} vs {}", w, h);
        }
        assert!(result.error[2999].abs() < 1e-6);
        assert!(result.mse[2999] < result.mse[10]);
        Ok(())
    }

    #[test]
    fn fixed_regressor_tracks_every_sample() -> Result<(), AdaptiveError> {
        let mut rng = StdRng::seed_from_u64(3);
        let regressor = centered_uniform(16, &mut rng);
        let desired: Vec<f64> = (0..64).map(|i| ((i * 7) % 13) as f64 - 6.0).collect();

        let mut filter = NlmsFilter::new(16, 1.0, 2, 0.01)?.with_random_weights(&mut rng);
        let result = filter.adapt_fixed(&regressor, &desired)?;
        for (y, d) in result.output.iter().zip(&desired) {
            assert!((y - d).abs() < 1e-6, "{} vs {}", y, d);
        }
        Ok(())
    }

    #[test]
    fn threshold_stops_updates_early() -> Result<(), AdaptiveError> {
        let regressor = [1.0, 0.0];

        let mut single = NlmsFilter::new(2, 0.5, 10, f64::INFINITY)?;
        let result = single.adapt_fixed(&regressor, &[8.0])?;
        assert!((result.output[0] - 4.0).abs() < 1e-6);

        let mut repeated = NlmsFilter::new(2, 0.5, 10, 0.0)?;
        let result = repeated.adapt_fixed(&regressor, &[8.0])?;
        assert!((result.output[0] - 8.0 * (1.0 - 0.5f64.powi(10))).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn initial_weights_must_match_taps() -> Result<(), AdaptiveError> {
        let filter = NlmsFilter::new(3, 1.0, 1, 0.0)?;
        assert_eq!(
            filter.clone().with_weights(vec![1.0; 2]),
            Err(AdaptiveError::TapCount {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(filter.with_weights(vec![0.25; 3])?.weights(), &[0.25; 3]);
        Ok(())
    }

    #[test]
    fn running_mse_averages_squared_error() -> Result<(), AdaptiveError> {
        let mut filter = NlmsFilter::new(1, 0.5, 1, 0.0)?;
        let result = filter.adapt_fixed(&[1.0], &[2.0, 2.0])?;
        // Outputs 1.0 then 1.5
        assert!((result.error[0] - 1.0).abs() < 1e-6);
        assert!((result.error[1] - 0.5).abs() < 1e-6);
        assert!((result.mse[1] - 0.625).abs() < 1e-6);
        assert_eq!(result.final_mse(), Some(result.mse[1]));
        Ok(())
    }

    #[test]
    fn mismatched_lengths_are_rejected() -> Result<(), AdaptiveError> {
        let mut filter = NlmsFilter::new(2, 1.0, 1, 0.0)?;
        assert_eq!(
            filter.adapt(&[1.0], &[1.0, 2.0]),
            Err(AdaptiveError::LengthMismatch {
                reference: 1,
                desired: 2
            })
        );
        assert_eq!(filter.adapt(&[], &[]), Err(AdaptiveError::EmptySignal));
        Ok(())
    }
}
