// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! Noise mixing module
//!
//! This module produces noisy versions of a clean signal at prescribed
//! signal-to-noise ratios: RMS scaling, alignment of signals of unequal
//! length, clipping-safe normalization and the SNR sweep driver.

pub mod align;
pub mod linspace;
pub mod mixer;
pub mod normalize;
pub mod rms;

pub use align::{align, align_frames, Alignment, Truncated};
pub use linspace::{linspace, SnrSweep};
pub use mixer::{MixedSignal, NoiseMixer};
pub use normalize::clip_guard;
pub use rms::{mse, rms, target_rms};

use crate::signal::AudioFormat;
use thiserror::Error;

/// Errors that abort a mix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MixError {
    #[error("Audio formats do not agree (clean: {clean}, noise: {noise})")]
    FormatMismatch {
        clean: AudioFormat,
        noise: AudioFormat,
    },
    #[error("The {0} signal is empty")]
    EmptySignal(&'static str),
    #[error("The {0} signal is silent (RMS is zero), SNR scaling is undefined")]
    DegenerateSignal(&'static str),
    #[error("Signal lengths must agree: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("Invalid SNR sweep: at least one point is required (got {0})")]
    InvalidSweep(usize),
}
