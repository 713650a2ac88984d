// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! Adaptive filtering module
//!
//! Normalized LMS filtering of a desired signal. The filter either follows a
//! reference signal through a tapped delay line or, as in the noise-tracking
//! experiments, re-adapts against one fixed regressor for every sample.

pub mod nlms;

pub use nlms::{centered_uniform, NlmsFilter, NlmsOutput};

use thiserror::Error;

/// Errors raised when building or running an adaptive filter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdaptiveError {
    #[error("Step size must lie strictly between 0 and 2 (got {0})")]
    StepSize(f64),
    #[error("An adaptive filter needs at least one tap")]
    NoTaps,
    #[error("Expected {expected} values for a {expected}-tap filter, got {actual}")]
    TapCount { expected: usize, actual: usize },
    #[error("Reference has {reference} samples but the desired signal has {desired}")]
    LengthMismatch { reference: usize, desired: usize },
    #[error("The desired signal is empty")]
    EmptySignal,
}
