// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! Linear convolution module
//!
//! Two algorithms with the same contract: the output of convolving `a` with
//! `b` has `a.len() + b.len() - 1` samples, and an empty input gives an
//! empty output.
//!
//! - `direct`: the discrete convolution sum, O(len(a) * len(b))
//! - `via_fft`: zero-padded FFT product, O(M log M)

mod direct;
mod fft;

pub use direct::direct;
pub use fft::{via_fft, via_fft_complex};

use serde::{Deserialize, Serialize};

/// Trait for implementing linear convolution
pub trait Convolver: Send + Sync {
    /// Convolve `a` with `b`, returning `a.len() + b.len() - 1` samples
    fn convolve(&self, a: &[f64], b: &[f64]) -> Vec<f64>;
}

/// Convolution by the direct sum
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectConvolver;

impl Convolver for DirectConvolver {
    fn convolve(&self, a: &[f64], b: &[f64]) -> Vec<f64> {
        direct(a, b)
    }
}

/// Convolution through the frequency domain
#[derive(Debug, Clone, Copy, Default)]
pub struct FftConvolver;

impl Convolver for FftConvolver {
    fn convolve(&self, a: &[f64], b: &[f64]) -> Vec<f64> {
        via_fft(a, b)
    }
}

/// Available convolution algorithms
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ConvolutionMethod {
    /// Quadratic direct sum, for short filters
    Direct,
    /// FFT based, for long signals
    #[default]
    Fft,
}

/// Length of the linear convolution of two sequences
pub fn output_len(a_len: usize, b_len: usize) -> usize {
    if a_len == 0 || b_len == 0 {
        0
    } else {
        a_len + b_len - 1
    }
}

/// Create a convolver for the given method
///
/// # Arguments
///
/// * `method` - Convolution algorithm to use
///
/// # Returns
///
/// A boxed `Convolver` implementing `method`
///
/// # Example
///
/// ```
/// use rust_research_tools::convolution::{create_convolver, ConvolutionMethod};
///
/// let convolver = create_convolver(ConvolutionMethod::Direct);
/// let out = convolver.convolve(&[1.0, 0.0, 0.0], &[1.0, 1.0, 1.0]);
/// assert_eq!(out, vec![1.0, 1.0, 1.0, 0.0, 0.0]);
/// ```
pub fn create_convolver(method: ConvolutionMethod) -> Box<dyn Convolver> {
    match method {
        ConvolutionMethod::Direct => Box::new(DirectConvolver),
        ConvolutionMethod::Fft => Box::new(FftConvolver),
    }
}
